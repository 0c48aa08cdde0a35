//! Timer dispatch.

use tracing::{debug, warn};

use super::{Engine, EngineEvent};
use crate::scheduler::{ScheduledTask, Task};

impl Engine {
    pub(super) fn run_task(&mut self, scheduled: ScheduledTask, events: &mut Vec<EngineEvent>) {
        if scheduled.epoch != self.state.epoch {
            warn!(
                timer = %scheduled.id,
                task = ?scheduled.task,
                epoch = scheduled.epoch,
                current = self.state.epoch,
                "stale timer from before a reset, dropped"
            );
            return;
        }
        debug!(timer = %scheduled.id, task = ?scheduled.task, at = scheduled.due, "timer fired");

        match scheduled.task {
            Task::HideAnimation { kind } => self.hide_animation(kind, events),
            Task::PlayNextAnimation => {
                if self.state.animations.is_playing() && self.state.animations.showing().is_none() {
                    self.play_next_animation(events);
                }
            }
            Task::FinishCollection { id } => self.finish_collection(id, events),
            Task::UnblockDeck { then, ends_turn } => self.unblock_deck(then, ends_turn, events),
            Task::CloseDataGrab => self.close_data_grab(events),
            Task::RestoreDataGrabBoard => self.restore_data_grab(events),
        }
    }
}
