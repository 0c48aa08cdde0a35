//! Collection lifecycle and end of turn.

use tracing::{debug, info, warn};

use super::{AudioTrack, Engine, EngineEvent};
use crate::animation::{Continuation, LockReason};
use crate::rules::check_win_condition;
use crate::scheduler::Task;
use crate::zones::{settle, CollectionId, CollectionRequest};

impl Engine {
    /// Block transitions and start the flight timer for `request`.
    pub(super) fn start_collection(
        &mut self,
        request: CollectionRequest,
        events: &mut Vec<EngineEvent>,
    ) {
        let duration_ms = request.duration(&self.config.timings);
        let cards = request.distributions.len();
        let launch_stacks = request.launch_stack_count;

        let id = self.state.collections.start(request);
        self.state.lock.acquire(LockReason::Collection);
        self.schedule(duration_ms, Task::FinishCollection { id });

        debug!(%id, cards, launch_stacks, duration_ms, "collection started");
        events.push(EngineEvent::CollectionStarted {
            id,
            cards,
            launch_stacks,
            duration_ms,
        });
        if launch_stacks > 0 {
            events.push(EngineEvent::Audio(AudioTrack::LaunchStackRocket));
        }
    }

    pub(super) fn finish_collection(&mut self, id: CollectionId, events: &mut Vec<EngineEvent>) {
        let Some(request) = self.state.collections.take(id) else {
            warn!(%id, "finish for an unknown collection");
            return;
        };

        let winner = self.state.turn.winner();
        let settlement = settle(
            &mut self.state.players,
            &request,
            self.state.effects.claims(),
            winner,
        );
        debug!(
            %id,
            collected = settlement.collected.len(),
            skipped = settlement.skipped,
            "collection settled"
        );
        events.push(EngineEvent::CollectionFinished {
            id,
            collected: settlement.collected,
        });

        self.schedule(
            self.config.timings.deck_unblock_delay_ms,
            Task::UnblockDeck {
                then: request.then,
                ends_turn: request.ends_turn,
            },
        );
    }

    /// The deck-unblock delay has passed: check the win conditions, end the
    /// turn if this was its last collection, drop the collection block once
    /// no other collection is flying, then run `then`.
    pub(super) fn unblock_deck(
        &mut self,
        then: Option<Continuation>,
        ends_turn: bool,
        events: &mut Vec<EngineEvent>,
    ) {
        let over = check_win_condition(&mut self.state, &self.config);
        if over {
            self.finish_game(events);
        } else if ends_turn {
            self.end_turn(events);
        }

        let released =
            self.state.collections.is_idle() && self.state.lock.release(LockReason::Collection);
        if let Some(next) = then.filter(|_| !over) {
            self.register(next);
        }
        if released && !self.state.lock.is_blocked() {
            events.push(EngineEvent::TransitionsUnblocked);
        }
        self.try_resume(events);
    }

    fn end_turn(&mut self, events: &mut Vec<EngineEvent>) {
        let finished = self.state.turn.number;
        self.state.effects.clear_turn();
        self.state.turn.advance();
        self.state.data_grab = None;
        self.state.tantrum = None;
        self.state.open_what_you_want = None;

        info!(turn = finished, "turn ended");
        events.push(EngineEvent::TurnEnded { turn: finished });
    }
}
