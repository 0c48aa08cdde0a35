//! # data-war
//!
//! Turn-resolution and special-effect engine for Data War, a two-sided
//! (player vs CPU) variant of the card game War with special cards.
//!
//! ## Design Principles
//!
//! 1. **Reducer, not callbacks**: every external input is a `Command`
//!    applied by `Engine::dispatch`; every observable change comes back as
//!    an `EngineEvent`.
//!
//! 2. **Virtual time**: animations, collections and sub-game windows run
//!    on a deterministic scheduler driven by `Engine::advance`. A reset
//!    bumps the game epoch so timers from the old game never fire into
//!    the new one.
//!
//! 3. **One card, one place**: every card is in exactly one deck, board,
//!    Launch-Stack pile or Data Grab pool. `GameState::census` checks it.
//!
//! ## Modules
//!
//! - `core`: Players, state, commands, configuration, errors, RNG
//! - `cards`: Cards, special types, board entries, the deck recipe
//! - `rules`: Turn values, the Data-War detector, win conditions
//! - `effects`: Pending effects and per-type handlers
//! - `resolution`: The effect queue and Launch-Stack claims
//! - `zones`: Card collection and distribution
//! - `subgames`: Temper Tantrum, Open What You Want, Data Grab
//! - `animation`: Transition lock, continuation slot, animation queue
//! - `scheduler`: Virtual clock and deferred tasks
//! - `game`: The engine, its events and snapshots
//! - `observability`: Logging setup

pub mod animation;
pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod observability;
pub mod resolution;
pub mod rules;
pub mod scheduler;
pub mod subgames;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Command, ConfigError, EngineError, GameConfig, GameRng, GameState, Player, PlayerId,
    PlayerMap, SnapshotError, Timings, TurnPhase, TurnState,
};

pub use crate::cards::{Card, CardId, DeckRecipe, PlayedCardState, SpecialType};

pub use crate::rules::{TurnOutcome, WinCondition, WinState};

pub use crate::effects::PendingEffect;

pub use crate::animation::{AnimationKind, LockReason};

pub use crate::zones::{CardDistribution, CardSource, CollectionRequest};

pub use crate::game::{AudioTrack, ChoiceKind, Engine, EngineEvent, GameSetup, GameSnapshot};

pub use crate::observability::init_logging;
