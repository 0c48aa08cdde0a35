//! Core engine types: players, state, commands, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these. The game's tunable rule
//! constants live in `GameConfig` rather than in the rule code.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Command;
pub use config::{GameConfig, Timings};
pub use error::{ConfigError, EngineError, SnapshotError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{ActiveEffect, GameState, Player, TurnPhase, TurnState};
