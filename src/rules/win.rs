//! Win evaluation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{GameConfig, GameState, PlayerId};

/// How the game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// The opponent ran out of cards (also used for Data-War forfeits).
    AllCards,
    /// Enough Launch Stacks collected.
    LaunchStacks,
}

/// The recorded result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinState {
    pub winner: PlayerId,
    pub win_condition: WinCondition,
}

/// Record a winner unless one is already recorded.
///
/// Returns the winner that ends up recorded.
pub fn declare_winner(
    state: &mut GameState,
    winner: PlayerId,
    condition: WinCondition,
) -> WinState {
    if let Some(existing) = state.win {
        return existing;
    }
    let win = WinState {
        winner,
        win_condition: condition,
    };
    info!(%winner, ?condition, turn = state.turn.number, "game over");
    state.win = Some(win);
    win
}

/// Check the win conditions. First match wins:
///
/// 1. The opponent's deck is empty and they have nothing in play: `AllCards`.
/// 2. A side's Launch-Stack count reached the threshold: `LaunchStacks`.
///
/// The player is checked before the CPU in both. Returns true if a winner
/// is recorded, without re-evaluating when one already was.
pub fn check_win_condition(state: &mut GameState, config: &GameConfig) -> bool {
    if state.win.is_some() {
        return true;
    }

    for side in PlayerId::all() {
        let opponent = state.player(side.opponent());
        if opponent.deck.is_empty() && !opponent.has_card_in_play() {
            declare_winner(state, side, WinCondition::AllCards);
            return true;
        }
    }

    for side in PlayerId::all() {
        if state.player(side).launch_stack_count() >= config.launch_stack_threshold {
            declare_winner(state, side, WinCondition::LaunchStacks);
            return true;
        }
    }

    false
}
