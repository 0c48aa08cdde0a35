//! Virtual-clock task scheduler.
//!
//! Every "wait" in the engine (animation display time, inter-animation
//! gaps, collection flights, the Data Grab window) is a task scheduled on
//! a virtual clock. Production binds `advance` to the platform timer;
//! tests advance the clock by hand.
//!
//! ## Ordering
//!
//! Tasks fire in due-time order; tasks due at the same instant fire in
//! the order they were scheduled.
//!
//! ## Epochs
//!
//! Each task records the game epoch it was scheduled in. A reset bumps the
//! epoch, and the engine drops tasks from older epochs when they fire, so a
//! late timer can never touch a fresh game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationKind, Continuation};
use crate::zones::CollectionId;

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Deferred engine work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Display time of an animation is over.
    HideAnimation { kind: AnimationKind },
    /// Inter-animation gap is over; show the next entry.
    PlayNextAnimation,
    /// A collection's flight time is over; settle it.
    FinishCollection { id: CollectionId },
    /// Re-enable deck interaction after a collection, check for a winner,
    /// then resume.
    UnblockDeck {
        then: Option<Continuation>,
        ends_turn: bool,
    },
    /// The Data Grab window closes.
    CloseDataGrab,
    /// Put held Launch Stacks back on the board after a Data Grab.
    RestoreDataGrabBoard,
}

/// A task with its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TimerId,
    pub due: u64,
    pub epoch: u64,
    pub task: Task,
}

/// Virtual clock plus pending tasks.
///
/// ## Example
///
/// ```
/// use data_war::scheduler::{Scheduler, Task};
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(100, 0, Task::CloseDataGrab);
///
/// assert!(scheduler.pop_due(99).is_none());
/// let fired = scheduler.pop_due(100).unwrap();
/// assert_eq!(fired.task, Task::CloseDataGrab);
/// assert_eq!(scheduler.now(), 100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    tasks: BTreeMap<(u64, u64), ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `task` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, epoch: u64, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay_ms);
        self.tasks.insert(
            (due, id.0),
            ScheduledTask {
                id,
                due,
                epoch,
                task,
            },
        );
        id
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<ScheduledTask> {
        let (&key, _) = self.tasks.iter().next()?;
        if key.0 > until {
            return None;
        }
        let task = self.tasks.remove(&key)?;
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }
}
