//! Game rules: the turn comparator, the Data-War detector and the win
//! evaluator.
//!
//! These are plain functions over `GameState`; the engine decides when to
//! call them.

pub mod comparator;
pub mod data_war;
pub mod win;

pub use comparator::{compare, refresh_turn_values, TurnOutcome};
pub use data_war::check_for_data_war;
pub use win::{check_win_condition, declare_winner, WinCondition, WinState};
