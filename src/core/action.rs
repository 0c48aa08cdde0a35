//! Commands: the typed inputs that advance the engine.
//!
//! The outer event-driven dispatcher (UI state machine) turns user input
//! and CPU turns into `Command`s and hands them to `Engine::dispatch`.
//! Turn-advancing commands are refused while the transition lock is held.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardId;

/// A command for the engine.
///
/// ## Example
///
/// ```
/// use data_war::core::{Command, PlayerId};
/// use data_war::cards::CardId;
///
/// let play = Command::PlayCard(PlayerId::Player);
/// assert!(play.advances_turn());
///
/// let keep = Command::confirm_tantrum(&[CardId::new(3)]);
/// assert!(!keep.advances_turn());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Deal a fresh standard game from the given seed.
    StartGame { seed: u64 },

    /// Discard the current game and rebuild it from its original setup.
    ResetGame,

    /// Play the front card of a side's deck face-up.
    PlayCard(PlayerId),

    /// Commit a Data-War hand (face-down cards plus one face-up card).
    PlayWarHand(PlayerId),

    /// Compare the played cards and run everything that follows.
    ResolveTurn,

    /// Temper Tantrum: the winner's cards to keep.
    ConfirmTemperTantrum { keep: SmallVec<[CardId; 2]> },

    /// Open What You Want: the new order of the revealed cards, front first.
    ConfirmOpenWhatYouWant { order: SmallVec<[CardId; 3]> },

    /// Data Grab: a side taps a card in the pool.
    GrabCard { player: PlayerId, card: CardId },

    /// Close the Data Grab results modal.
    DismissDataGrabResults,
}

impl Command {
    /// Build a Temper Tantrum confirmation.
    #[must_use]
    pub fn confirm_tantrum(keep: &[CardId]) -> Self {
        Command::ConfirmTemperTantrum {
            keep: SmallVec::from_slice(keep),
        }
    }

    /// Build an Open What You Want confirmation.
    #[must_use]
    pub fn confirm_order(order: &[CardId]) -> Self {
        Command::ConfirmOpenWhatYouWant {
            order: SmallVec::from_slice(order),
        }
    }

    /// Does this command move the turn forward? Those must respect the
    /// transition lock.
    #[must_use]
    pub fn advances_turn(&self) -> bool {
        matches!(
            self,
            Command::PlayCard(_) | Command::PlayWarHand(_) | Command::ResolveTurn
        )
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::StartGame { .. } => "start_game",
            Command::ResetGame => "reset_game",
            Command::PlayCard(_) => "play_card",
            Command::PlayWarHand(_) => "play_war_hand",
            Command::ResolveTurn => "resolve_turn",
            Command::ConfirmTemperTantrum { .. } => "confirm_temper_tantrum",
            Command::ConfirmOpenWhatYouWant { .. } => "confirm_open_what_you_want",
            Command::GrabCard { .. } => "grab_card",
            Command::DismissDataGrabResults => "dismiss_data_grab_results",
        }
    }
}
