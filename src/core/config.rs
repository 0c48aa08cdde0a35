//! Game configuration types.
//!
//! The engine never hardcodes thresholds or durations - everything the
//! rules and the animation layer depend on comes from `GameConfig`:
//! - Rule constants (Launch-Stack threshold, war hand size, ...)
//! - `Timings`: display durations in virtual milliseconds
//! - `DeckRecipe`: the composition of the standard deck
//!
//! Configs are plain serde data, so they can be loaded from TOML.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::DeckRecipe;

/// Display and settle durations, in virtual milliseconds.
///
/// These drive the scheduler; tests advance the virtual clock through them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long one effect animation stays on screen.
    pub effect_animation_ms: u64,

    /// Pause between two queued animations.
    pub inter_animation_gap_ms: u64,

    /// Card-flight duration of a collection without rockets.
    pub collection_base_ms: u64,

    /// Duration of one Launch-Stack rocket.
    pub per_rocket_ms: u64,

    /// Pause between two rockets.
    pub inter_rocket_gap_ms: u64,

    /// Delay between a collection settling and deck interaction unblocking.
    pub deck_unblock_delay_ms: u64,

    /// How long the Data Grab window stays open.
    pub data_grab_window_ms: u64,

    /// Delay before Data Grab cards are visually restored to the board.
    pub data_grab_restore_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            effect_animation_ms: 1800,
            inter_animation_gap_ms: 300,
            collection_base_ms: 600,
            per_rocket_ms: 1200,
            inter_rocket_gap_ms: 250,
            deck_unblock_delay_ms: 300,
            data_grab_window_ms: 5000,
            data_grab_restore_delay_ms: 400,
        }
    }
}

impl Timings {
    /// All durations zero - useful for tests that only care about ordering.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            effect_animation_ms: 0,
            inter_animation_gap_ms: 0,
            collection_base_ms: 0,
            per_rocket_ms: 0,
            inter_rocket_gap_ms: 0,
            deck_unblock_delay_ms: 0,
            data_grab_window_ms: 0,
            data_grab_restore_delay_ms: 0,
        }
    }

    /// Total rocket animation time for `launch_stacks` rockets:
    /// `n × per_rocket + (n - 1) × gap`.
    #[must_use]
    pub fn rocket_duration(&self, launch_stacks: u32) -> u64 {
        if launch_stacks == 0 {
            return 0;
        }
        let n = u64::from(launch_stacks);
        n * self.per_rocket_ms + (n - 1) * self.inter_rocket_gap_ms
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Launch Stacks needed to win.
    pub launch_stack_threshold: u32,

    /// Face-down cards each side commits per Data-War round
    /// (one more card is committed face-up).
    pub war_face_down_count: usize,

    /// Fixed effective value of a Hostile Takeover.
    pub hostile_takeover_value: i32,

    /// Minimum board size for a Data Grab to trigger.
    pub data_grab_min_board_cards: usize,

    /// Cards the Temper Tantrum winner may keep.
    pub tantrum_max_keep: usize,

    /// Cards taken from the opponent's deck by a Leveraged Buyout.
    pub buyout_card_count: usize,

    /// Cards revealed by Open What You Want.
    pub open_what_you_want_count: usize,

    /// Animation and settle durations.
    pub timings: Timings,

    /// Composition of the standard deck.
    pub deck: DeckRecipe,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            launch_stack_threshold: 3,
            war_face_down_count: 3,
            hostile_takeover_value: 6,
            data_grab_min_board_cards: 3,
            tantrum_max_keep: 2,
            buyout_card_count: 2,
            open_what_you_want_count: 3,
            timings: Timings::default(),
            deck: DeckRecipe::standard(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take default values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Cards a side needs in its deck to play one Data-War round.
    #[must_use]
    pub fn war_hand_size(&self) -> usize {
        self.war_face_down_count + 1
    }

    /// Check rule constants for values the engine can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launch_stack_threshold == 0 {
            return Err(ConfigError::Invalid(
                "launch_stack_threshold must be at least 1".into(),
            ));
        }
        if self.tantrum_max_keep == 0 {
            return Err(ConfigError::Invalid("tantrum_max_keep must be at least 1".into()));
        }
        if self.hostile_takeover_value < 0 {
            return Err(ConfigError::Invalid(
                "hostile_takeover_value must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Set the Launch-Stack win threshold.
    #[must_use]
    pub fn with_launch_stack_threshold(mut self, threshold: u32) -> Self {
        self.launch_stack_threshold = threshold;
        self
    }

    /// Set the Data Grab trigger threshold.
    #[must_use]
    pub fn with_data_grab_min_board_cards(mut self, min: usize) -> Self {
        self.data_grab_min_board_cards = min;
        self
    }

    /// Replace all timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Replace the deck recipe.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckRecipe) -> Self {
        self.deck = deck;
        self
    }
}
