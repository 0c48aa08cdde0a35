//! Continuations: what the engine does once the lock clears.
//!
//! There is exactly one slot. A continuation is a typed value rather than
//! a stored closure, so what runs on resume is always one of a known set
//! of steps.

use serde::{Deserialize, Serialize};

/// A deferred engine step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    /// Run the handler of the in-flight effect (its animation has played).
    ApplyEffect,
    /// Pick up the effect queue where it paused.
    ResumeEffectQueue,
}

/// Holds at most one pending continuation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContinuationSlot {
    pending: Option<Continuation>,
}

impl ContinuationSlot {
    /// Register `next`.
    ///
    /// Registering the continuation already held is a no-op. If a different
    /// one is held, the slot is left alone and the held one is returned.
    pub fn register(&mut self, next: Continuation) -> Result<(), Continuation> {
        match self.pending {
            None => {
                self.pending = Some(next);
                Ok(())
            }
            Some(held) if held == next => Ok(()),
            Some(held) => Err(held),
        }
    }

    /// Take the continuation, leaving the slot empty.
    pub fn take(&mut self) -> Option<Continuation> {
        self.pending.take()
    }

    #[must_use]
    pub fn peek(&self) -> Option<Continuation> {
        self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
