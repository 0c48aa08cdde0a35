//! Card system: immutable cards, board state, and deck recipes.
//!
//! ## Key Types
//!
//! - `CardId`: Unique identity of one physical card
//! - `SpecialType`: The card's special behavior (tracker, launch stack, ...)
//! - `Card`: Immutable identity + special type + base value
//! - `PlayedCardState`: A card on the board with its face orientation
//! - `DeckRecipe`: Composition of the full game deck

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{Card, CardId, SpecialType};
pub use instance::PlayedCardState;
pub use registry::{DeckRecipe, RecipeEntry};
