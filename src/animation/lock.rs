//! The transition lock.
//!
//! A single coarse "block transitions" signal the outer UI state machine
//! polls before sending any turn-advancing command. It is reason-tagged:
//! every subsystem acquires and releases its own reason, so clearing one
//! hold never releases another subsystem's.

use im::OrdSet;
use serde::{Deserialize, Serialize};

/// Why transitions are currently blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    /// The animation queue is draining (gaps included).
    Animation,
    /// A card collection is in flight or its deck unblock is pending.
    Collection,
    /// Waiting on a Temper Tantrum or Open What You Want choice.
    PlayerChoice,
    /// The Data Grab window is open.
    DataGrab,
    /// The Data Grab results modal is showing.
    ResultsModal,
}

/// Reason-tagged lock. Blocked iff any reason is held.
///
/// ## Example
///
/// ```
/// use data_war::animation::{LockReason, TransitionLock};
///
/// let mut lock = TransitionLock::new();
/// lock.acquire(LockReason::Animation);
/// lock.acquire(LockReason::ResultsModal);
///
/// lock.release(LockReason::Animation);
/// assert!(lock.is_blocked());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionLock {
    reasons: OrdSet<LockReason>,
}

impl TransitionLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `reason`. Returns false if it was already held.
    pub fn acquire(&mut self, reason: LockReason) -> bool {
        self.reasons.insert(reason).is_none()
    }

    /// Drop `reason`. Returns false if it wasn't held.
    pub fn release(&mut self, reason: LockReason) -> bool {
        self.reasons.remove(&reason).is_some()
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        !self.reasons.is_empty()
    }

    #[must_use]
    pub fn holds(&self, reason: LockReason) -> bool {
        self.reasons.contains(&reason)
    }

    /// Held reasons in a stable order.
    #[must_use]
    pub fn reasons(&self) -> Vec<LockReason> {
        self.reasons.iter().copied().collect()
    }

    /// Drop every reason at once. Only a reset does this.
    pub fn clear(&mut self) {
        self.reasons = OrdSet::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release() {
        let mut lock = TransitionLock::new();
        assert!(!lock.is_blocked());

        assert!(lock.acquire(LockReason::Collection));
        assert!(!lock.acquire(LockReason::Collection));
        assert!(lock.is_blocked());

        assert!(lock.release(LockReason::Collection));
        assert!(!lock.release(LockReason::Collection));
        assert!(!lock.is_blocked());
    }

    #[test]
    fn test_release_keeps_other_reasons() {
        let mut lock = TransitionLock::new();
        lock.acquire(LockReason::ResultsModal);
        lock.acquire(LockReason::Animation);

        lock.release(LockReason::Animation);

        assert!(lock.holds(LockReason::ResultsModal));
        assert_eq!(lock.reasons(), vec![LockReason::ResultsModal]);
    }

    #[test]
    fn test_reasons_sorted() {
        let mut lock = TransitionLock::new();
        lock.acquire(LockReason::DataGrab);
        lock.acquire(LockReason::Animation);

        assert_eq!(lock.reasons(), vec![LockReason::Animation, LockReason::DataGrab]);
    }
}
