//! Open What You Want: look at the top of your own deck and reorder it.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{EngineError, Player, PlayerId};

/// Revealed cards awaiting a new order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWhatYouWantState {
    pub player: PlayerId,
    /// Front of the deck at reveal time, front first.
    pub revealed: Vec<Card>,
}

impl OpenWhatYouWantState {
    /// Reveal up to `count` cards. Nothing to reorder below two cards.
    #[must_use]
    pub fn open(player: &Player, count: usize) -> Option<Self> {
        if player.deck.len() < 2 || count < 2 {
            return None;
        }
        Some(Self {
            player: player.id,
            revealed: player.deck.iter().take(count).copied().collect(),
        })
    }

    /// Put the revealed cards back in `order`, which must be a permutation
    /// of their ids.
    pub fn apply(&self, player: &mut Player, order: &[CardId]) -> Result<(), EngineError> {
        let mut expected: Vec<CardId> = self.revealed.iter().map(|c| c.id).collect();
        let on_top: Vec<CardId> = player.deck.iter().take(expected.len()).map(|c| c.id).collect();
        if on_top != expected {
            return Err(EngineError::InvalidSelection("deck changed since the reveal".into()));
        }

        let mut given = order.to_vec();
        expected.sort_unstable();
        given.sort_unstable();
        if expected != given {
            return Err(EngineError::InvalidSelection(
                "order must list each revealed card once".into(),
            ));
        }

        let front: Vec<Card> = (0..self.revealed.len())
            .filter_map(|_| player.deck.pop_front())
            .collect();
        for id in order.iter().rev() {
            if let Some(card) = front.iter().find(|c| c.id == *id) {
                player.deck.push_front(*card);
            }
        }
        Ok(())
    }
}
