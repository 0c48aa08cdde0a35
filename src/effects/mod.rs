//! Special-card effects.
//!
//! - `PendingEffect`: a queued, unresolved special-card consequence
//! - `applies`: whether an effect acts given the turn winner
//! - `handler_for`: the per-type handler table
//!
//! The queue that holds pending effects is in `resolution`; the processor
//! that drains it is in `game`.

mod effect;
mod handlers;

pub use effect::{applies, PendingEffect};
pub use handlers::{handler_for, Handler, HandlerContext, HandlerOutcome};
