//! Turn comparator: effective values and the turn outcome.
//!
//! `compare` is a pure function of both sides' `current_turn_value`.
//! `refresh_turn_values` recomputes those values from the board.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, SpecialType};
use crate::core::{GameConfig, GameState, Player, PlayerId};

/// Who took the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Player,
    Cpu,
    Tie,
}

impl TurnOutcome {
    #[must_use]
    pub const fn won_by(player: PlayerId) -> Self {
        match player {
            PlayerId::Player => TurnOutcome::Player,
            PlayerId::Cpu => TurnOutcome::Cpu,
        }
    }

    #[must_use]
    pub const fn winner(self) -> Option<PlayerId> {
        match self {
            TurnOutcome::Player => Some(PlayerId::Player),
            TurnOutcome::Cpu => Some(PlayerId::Cpu),
            TurnOutcome::Tie => None,
        }
    }

    #[must_use]
    pub const fn is_tie(self) -> bool {
        matches!(self, TurnOutcome::Tie)
    }
}

impl std::fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnOutcome::Player => write!(f, "player"),
            TurnOutcome::Cpu => write!(f, "cpu"),
            TurnOutcome::Tie => write!(f, "tie"),
        }
    }
}

/// Compare both sides' effective values. Never mutates.
///
/// ```
/// use data_war::core::{Player, PlayerId};
/// use data_war::rules::{compare, TurnOutcome};
///
/// let mut player = Player::new(PlayerId::Player, Vec::new());
/// let mut cpu = Player::new(PlayerId::Cpu, Vec::new());
/// player.current_turn_value = 5;
/// cpu.current_turn_value = 3;
///
/// assert_eq!(compare(&player, &cpu), TurnOutcome::Player);
/// ```
#[must_use]
pub fn compare(player: &Player, cpu: &Player) -> TurnOutcome {
    use std::cmp::Ordering;

    match player.current_turn_value.cmp(&cpu.current_turn_value) {
        Ordering::Greater => TurnOutcome::Player,
        Ordering::Less => TurnOutcome::Cpu,
        Ordering::Equal => TurnOutcome::Tie,
    }
}

/// Base value of a top card. Modifier cards contribute nothing.
fn base_value(card: Option<Card>) -> i32 {
    match card {
        Some(card) if !card.requires_follow_up() => i32::from(card.value),
        _ => 0,
    }
}

fn shows_takeover(player: &Player) -> bool {
    player.played_card.is_some_and(|c| c.is_hostile_takeover())
}

/// Recompute pending bonuses/penalties and both effective values.
///
/// Without a Hostile Takeover: `max(0, base + own trackers - opponent
/// blockers)`, where an opposing tracker smacker cancels the tracker
/// bonus. With a Hostile Takeover active, modifiers are ignored and the
/// takeover card counts as the configured fixed value.
pub fn refresh_turn_values(state: &mut GameState, config: &GameConfig) {
    let takeover = state.turn.hostile_takeover_by;

    for side in PlayerId::all() {
        let (me, opponent) = state.players.pair_mut(side);

        me.pending_tracker_bonus = if opponent.has_tracker_smacker() {
            0
        } else {
            me.active_total(SpecialType::Tracker)
        };
        me.pending_blocker_penalty = opponent.active_total(SpecialType::Blocker);
    }

    for (side, player) in state.players.iter_mut() {
        let base = base_value(player.played_card);
        player.current_turn_value = match takeover {
            Some(owner) if owner == side && shows_takeover(player) => config.hostile_takeover_value,
            Some(_) => base,
            None => (base + player.pending_tracker_bonus - player.pending_blocker_penalty).max(0),
        };
    }
}
