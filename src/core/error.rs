//! Error types.
//!
//! Only commands coming from the outer dispatcher can fail. Everything the
//! engine does on its own (timers, effect handlers, collections) degrades
//! to a logged no-op instead.

use thiserror::Error;

use super::player::PlayerId;
use crate::animation::LockReason;

/// Why a command was rejected. A rejected command never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Something still holds the transition lock.
    #[error("transitions are blocked by {0:?}")]
    TransitionsBlocked(Vec<LockReason>),

    /// A winner has been recorded.
    #[error("the game is over")]
    GameOver,

    /// The side can't play a card in the current turn phase.
    #[error("{0} cannot play right now")]
    CannotPlay(PlayerId),

    /// `ResolveTurn` before both sides are ready.
    #[error("turn is not ready to resolve")]
    NotReady,

    /// A sub-game command with no matching sub-game open.
    #[error("no {0} is open")]
    NoChoiceOpen(&'static str),

    /// The selection doesn't fit the open choice.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rule constant the engine can't work with.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// Malformed TOML.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Snapshot encoding or decoding failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
}
