//! Animation orchestrator.
//!
//! Plays effect animations strictly one at a time. The engine drives it
//! from scheduler tasks:
//!
//! 1. `enqueue` appends an entry. If nothing is playing, playback starts:
//!    the `Animation` lock reason is acquired and the engine calls
//!    `play_next`.
//! 2. `play_next` shows the head entry. The engine schedules a hide after
//!    the display duration, then another `play_next` after the gap.
//! 3. When `play_next` finds the queue empty, `drain_complete` releases
//!    the lock reason. The engine then tries to resume its continuation.
//!
//! The lock reason is held for the whole drain, gaps included.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::lock::{LockReason, TransitionLock};
use crate::cards::SpecialType;
use crate::core::PlayerId;

/// Animations the orchestrator knows how to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    DataWar,
    HostileTakeover,
    PatentTheft,
    LeveragedBuyout,
    TemperTantrum,
    MandatoryRecall,
    ForcedEmpathy,
}

impl AnimationKind {
    /// The generic queue animation of a special type, if it has one.
    ///
    /// Trackers, blockers and Launch Stacks play none. Forced Empathy and
    /// Open What You Want show their own animation at their trigger point.
    #[must_use]
    pub const fn for_effect(special: SpecialType) -> Option<Self> {
        match special {
            SpecialType::HostileTakeover => Some(AnimationKind::HostileTakeover),
            SpecialType::PatentTheft => Some(AnimationKind::PatentTheft),
            SpecialType::LeveragedBuyout => Some(AnimationKind::LeveragedBuyout),
            SpecialType::TemperTantrum => Some(AnimationKind::TemperTantrum),
            SpecialType::MandatoryRecall => Some(AnimationKind::MandatoryRecall),
            _ => None,
        }
    }
}

/// One queued animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationQueueEntry {
    pub kind: AnimationKind,
    pub played_by: PlayerId,
}

/// Result of `play_next`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// This entry is now showing.
    Show(AnimationQueueEntry),
    /// Nothing left to show.
    Drained,
}

/// Queue plus "show" state.
#[derive(Clone, Debug, Default)]
pub struct AnimationOrchestrator {
    queue: VecDeque<AnimationQueueEntry>,
    showing: Option<AnimationQueueEntry>,
    is_playing: bool,
}

impl AnimationOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns true if playback must start now.
    pub fn enqueue(&mut self, entry: AnimationQueueEntry, lock: &mut TransitionLock) -> bool {
        self.queue.push_back(entry);
        if self.is_playing {
            return false;
        }
        self.is_playing = true;
        lock.acquire(LockReason::Animation);
        true
    }

    /// Show the head of the queue.
    pub fn play_next(&mut self) -> Playback {
        debug_assert!(self.showing.is_none());
        match self.queue.pop_front() {
            Some(entry) => {
                self.showing = Some(entry);
                Playback::Show(entry)
            }
            None => Playback::Drained,
        }
    }

    /// Hide `kind`. Returns false when it isn't what's showing (stale timer).
    pub fn hide(&mut self, kind: AnimationKind) -> bool {
        match self.showing {
            Some(entry) if entry.kind == kind => {
                self.showing = None;
                true
            }
            _ => false,
        }
    }

    /// End of the drain: stop playing and drop the lock reason.
    pub fn drain_complete(&mut self, lock: &mut TransitionLock) {
        debug_assert!(self.queue.is_empty());
        self.is_playing = false;
        lock.release(LockReason::Animation);
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// The animation currently on screen.
    #[must_use]
    pub fn showing(&self) -> Option<AnimationKind> {
        self.showing.map(|e| e.kind)
    }

    #[must_use]
    pub fn is_showing(&self, kind: AnimationKind) -> bool {
        self.showing() == Some(kind)
    }

    /// Entries waiting behind the one showing.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}
