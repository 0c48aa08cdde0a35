//! Played cards - board-visible card state.
//!
//! A card on the board keeps its face orientation. Orientation matters
//! during a Data War (face-down commitments) and in the sub-games, where
//! a face-down Launch Stack is just an ordinary card.

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};

/// A card on the board with its face orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayedCardState {
    /// The card itself.
    pub card: Card,

    /// Was it committed face-down?
    #[serde(rename = "isFaceDown")]
    pub is_face_down: bool,
}

impl PlayedCardState {
    /// A face-up card.
    #[must_use]
    pub const fn face_up(card: Card) -> Self {
        Self {
            card,
            is_face_down: false,
        }
    }

    /// A face-down card.
    #[must_use]
    pub const fn face_down(card: Card) -> Self {
        Self {
            card,
            is_face_down: true,
        }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.card.id
    }

    /// Only face-up Launch Stacks count toward the Launch-Stack total.
    #[must_use]
    pub const fn is_counted_launch_stack(&self) -> bool {
        self.card.is_launch_stack() && !self.is_face_down
    }
}
