//! Deck recipes.
//!
//! A `DeckRecipe` lists how many copies of each (special type, value)
//! combination make up the full game deck. Building a recipe assigns
//! sequential, unique card ids starting at 1.

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, SpecialType};

/// One line of a recipe: `count` copies of a card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub special: SpecialType,
    pub value: u8,
    pub count: u32,
}

impl RecipeEntry {
    #[must_use]
    pub const fn new(special: SpecialType, value: u8, count: u32) -> Self {
        Self { special, value, count }
    }
}

/// Composition of the full (both players') deck.
///
/// ## Example
///
/// ```
/// use data_war::cards::{DeckRecipe, SpecialType};
///
/// let recipe = DeckRecipe::new()
///     .with(SpecialType::None, 5, 4)
///     .with(SpecialType::LaunchStack, 0, 2);
///
/// let cards = recipe.build();
/// assert_eq!(cards.len(), 6);
/// assert_eq!(cards[0].id.raw(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecipe {
    pub entries: Vec<RecipeEntry>,
}

impl DeckRecipe {
    /// Create an empty recipe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard Data War deck (68 cards, 34 per side).
    #[must_use]
    pub fn standard() -> Self {
        let mut recipe = Self::new();
        for value in 1..=6 {
            recipe = recipe.with(SpecialType::None, value, 6);
        }
        recipe
            .with(SpecialType::Tracker, 1, 2)
            .with(SpecialType::Tracker, 2, 2)
            .with(SpecialType::Blocker, 1, 2)
            .with(SpecialType::Blocker, 2, 2)
            .with(SpecialType::Blocker, 0, 2)
            .with(SpecialType::LaunchStack, 0, 6)
            .with(SpecialType::HostileTakeover, 6, 2)
            .with(SpecialType::PatentTheft, 3, 2)
            .with(SpecialType::LeveragedBuyout, 4, 2)
            .with(SpecialType::TemperTantrum, 2, 2)
            .with(SpecialType::MandatoryRecall, 5, 2)
            .with(SpecialType::ForcedEmpathy, 3, 2)
            .with(SpecialType::OpenWhatYouWant, 4, 2)
            .with(SpecialType::DataGrab, 5, 2)
    }

    /// Add `count` copies of a card kind (builder pattern).
    #[must_use]
    pub fn with(mut self, special: SpecialType, value: u8, count: u32) -> Self {
        self.entries.push(RecipeEntry::new(special, value, count));
        self
    }

    /// Total number of cards the recipe produces.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Number of cards of a given special type.
    #[must_use]
    pub fn count_of(&self, special: SpecialType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.special == special)
            .map(|e| e.count as usize)
            .sum()
    }

    /// Materialize the recipe, in recipe order, with ids `1..=total`.
    #[must_use]
    pub fn build(&self) -> Vec<Card> {
        let mut next_id = 1u32;
        let mut cards = Vec::with_capacity(self.total_cards());

        for entry in &self.entries {
            for _ in 0..entry.count {
                cards.push(Card::special(CardId::new(next_id), entry.special, entry.value));
                next_id += 1;
            }
        }

        cards
    }
}
