//! Pending effects: queued, unresolved special-card consequences.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, PlayedCardState, SpecialType};
use crate::core::PlayerId;

/// A special card whose consequence hasn't been applied yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEffect {
    #[serde(rename = "type")]
    pub effect_type: SpecialType,

    pub card: Card,

    pub played_by: PlayerId,

    /// Launch Stacks only: who gets the card instead of the turn winner.
    pub destination_override: Option<PlayerId>,
}

impl PendingEffect {
    /// The effect of a face-up special card. `None` for plain cards.
    #[must_use]
    pub fn from_played(played: &PlayedCardState, played_by: PlayerId) -> Option<Self> {
        if played.is_face_down || !played.card.special.is_special() {
            return None;
        }
        Some(Self {
            effect_type: played.card.special,
            card: played.card,
            played_by,
            destination_override: None,
        })
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card.id
    }

    #[must_use]
    pub fn with_override(mut self, destination: PlayerId) -> Self {
        self.destination_override = Some(destination);
        self
    }
}

/// Does this effect act at all, given the turn winner?
///
/// Theft, Buyout and Recall only act for the winner; Temper Tantrum only
/// acts when its player lost. Everything else acts unconditionally.
#[must_use]
pub fn applies(effect: &PendingEffect, winner: Option<PlayerId>) -> bool {
    match effect.effect_type {
        SpecialType::PatentTheft | SpecialType::LeveragedBuyout | SpecialType::MandatoryRecall => {
            winner == Some(effect.played_by)
        }
        SpecialType::TemperTantrum => winner == Some(effect.played_by.opponent()),
        _ => true,
    }
}
