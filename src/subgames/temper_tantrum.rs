//! Temper Tantrum: the turn winner keeps a couple of their own board cards
//! and surrenders the rest to the loser.
//!
//! Face-up Launch Stacks stay on the board for the turn's collection; a
//! surrendered one is redirected to the loser through its queued effect or
//! claim. Every other card moves to a deck right away, and the engine
//! plays a visual-only collection over the transfer.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardId, PlayedCardState};
use crate::core::{EngineError, GameState, Player, PlayerId};
use crate::zones::CardDistribution;

/// The open choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperTantrumState {
    /// Chooses what to keep.
    pub winner: PlayerId,
    /// Receives everything else.
    pub loser: PlayerId,
    /// The winner's board cards, in play order.
    pub candidates: Vec<PlayedCardState>,
    /// `min(tantrum_max_keep, candidates)`.
    pub max_keep: usize,
}

impl TemperTantrumState {
    #[must_use]
    pub fn open(winner: &Player, max_keep: usize) -> Self {
        let candidates: Vec<_> = winner.played_cards_in_hand.iter().copied().collect();
        Self {
            winner: winner.id,
            loser: winner.id.opponent(),
            max_keep: max_keep.min(candidates.len()),
            candidates,
        }
    }

    /// Check a selection: at most `max_keep` distinct candidate ids.
    pub fn validate(&self, keep: &[CardId]) -> Result<FxHashSet<CardId>, EngineError> {
        if keep.len() > self.max_keep {
            return Err(EngineError::InvalidSelection(format!(
                "can keep at most {} cards, got {}",
                self.max_keep,
                keep.len()
            )));
        }
        let mut selected = FxHashSet::default();
        for id in keep {
            if !self.candidates.iter().any(|c| c.id() == *id) {
                return Err(EngineError::InvalidSelection(format!("{id} is not a candidate")));
            }
            if !selected.insert(*id) {
                return Err(EngineError::InvalidSelection(format!("{id} selected twice")));
            }
        }
        Ok(selected)
    }

    /// What the CPU keeps: its highest values, earliest first on ties.
    #[must_use]
    pub fn cpu_selection(&self) -> Vec<CardId> {
        let mut ranked: Vec<&PlayedCardState> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.card.value.cmp(&a.card.value));
        ranked.into_iter().take(self.max_keep).map(PlayedCardState::id).collect()
    }

    /// Apply a validated selection.
    ///
    /// Returns the distributions to animate. Also sets the turn's board
    /// destination override to the loser, so the rest of the board follows.
    pub fn apply(&self, state: &mut GameState, keep: &FxHashSet<CardId>) -> Vec<CardDistribution> {
        let mut animated = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            let id = candidate.id();
            let kept = keep.contains(&id);
            let destination = if kept { self.winner } else { self.loser };

            if candidate.is_counted_launch_stack() {
                if !kept {
                    state.effects.override_destination(id, self.loser);
                }
                continue;
            }

            let Some(played) = state.player_mut(self.winner).remove_from_board(id) else {
                debug!(card = %id, "tantrum candidate already gone");
                continue;
            };
            state.player_mut(destination).deck.push_back(played.card);
            animated.push(CardDistribution::from_board(played.card, destination));
        }

        state.turn.board_destination_override = Some(self.loser);
        animated
    }
}
