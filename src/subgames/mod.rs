//! Player-facing sub-games that pause the effect queue: Data Grab,
//! Temper Tantrum and Open What You Want.
//!
//! Each one owns its own state and produces card movements; the engine
//! holds the transition lock while one is open and resumes the queue via
//! a continuation once it's settled.

pub mod data_grab;
pub mod open_what_you_want;
pub mod temper_tantrum;

pub use data_grab::{DataGrabResults, DataGrabStage, DataGrabState};
pub use open_what_you_want::OpenWhatYouWantState;
pub use temper_tantrum::TemperTantrumState;
