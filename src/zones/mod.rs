//! Card movement between the board, decks and Launch-Stack piles.
//!
//! ## Key Types
//!
//! - `CardDistribution`: one `(card, source, destination)` movement
//! - `CollectionRequest`: a batch of distributions plus animation inputs
//! - `CollectionTracker`: collections in flight
//! - `settle`: applies a request to the players

pub mod collection;

pub use collection::{
    board_distributions, settle, CardDistribution, CardSource, CollectionId, CollectionRequest,
    CollectionTracker, Settlement,
};
