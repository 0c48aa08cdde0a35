//! Animation orchestration: the one-at-a-time animation queue, the
//! reason-tagged transition lock and the continuation slot that resumes
//! the engine once the lock clears.

pub mod continuation;
pub mod lock;
pub mod orchestrator;

pub use continuation::{Continuation, ContinuationSlot};
pub use lock::{LockReason, TransitionLock};
pub use orchestrator::{AnimationKind, AnimationOrchestrator, AnimationQueueEntry, Playback};
