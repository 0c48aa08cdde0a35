//! Effect queue processing, animations and the sub-game glue.
//!
//! The pump pops one effect at a time. An effect with a queue animation
//! that hasn't been shown yet registers `ApplyEffect` and waits for the
//! animation to drain; anything else runs its handler right away. A
//! handler that has to wait (a collection, a choice, the Data Grab
//! window, an inline animation) leaves the pump stopped until the
//! continuation resumes it.

use tracing::{debug, info, warn};

use super::{AudioTrack, ChoiceKind, Engine, EngineEvent};
use crate::animation::{AnimationKind, AnimationQueueEntry, Continuation, LockReason, Playback};
use crate::cards::{CardId, SpecialType};
use crate::core::{EngineError, Player, PlayerId, PlayerMap, TurnPhase};
use crate::effects::{applies, handler_for, HandlerContext, HandlerOutcome, PendingEffect};
use crate::scheduler::Task;
use crate::subgames::DataGrabState;
use crate::zones::{board_distributions, CardDistribution, CollectionRequest};

impl Engine {
    /// Drain the effect queue as far as it goes without waiting.
    pub(super) fn pump(&mut self, events: &mut Vec<EngineEvent>) {
        loop {
            if self.state.is_over()
                || self.state.effects.in_flight().is_some()
                || self.state.lock.is_blocked()
                || self.state.animations.is_playing()
            {
                return;
            }

            let Some(effect) = self.state.effects.pop() else {
                self.start_turn_collection(events);
                return;
            };
            if !self.should_process(&effect) {
                continue;
            }
            self.state.effects.begin(effect);

            if let Some(kind) = AnimationKind::for_effect(effect.effect_type) {
                if !self.state.effects.was_shown(effect.card_id()) {
                    self.state.effects.mark_shown(&effect);
                    self.register(Continuation::ApplyEffect);
                    self.enqueue_animation(kind, effect.played_by, events);
                    return;
                }
            }

            if !self.apply_in_flight(events) {
                return;
            }
        }
    }

    fn should_process(&self, effect: &PendingEffect) -> bool {
        if handler_for(effect.effect_type).is_none() {
            warn!(card = %effect.card.id, effect = %effect.effect_type, "no handler, skipping");
            return false;
        }
        if !applies(effect, self.state.turn.winner()) {
            debug!(
                effect = %effect.effect_type,
                by = %effect.played_by,
                "effect doesn't apply this turn"
            );
            return false;
        }
        if effect.effect_type == SpecialType::HostileTakeover
            && self.state.player(effect.played_by.opponent()).has_tracker_smacker()
        {
            debug!(by = %effect.played_by, "hostile takeover skipped by tracker smacker");
            return false;
        }
        true
    }

    /// Run the in-flight effect's handler. Returns true if the pump may
    /// carry on immediately.
    pub(super) fn apply_in_flight(&mut self, events: &mut Vec<EngineEvent>) -> bool {
        let Some(effect) = self.state.effects.in_flight().copied() else {
            return true;
        };
        let Some(handler) = handler_for(effect.effect_type) else {
            self.state.effects.finish();
            return true;
        };

        let outcome = handler(
            &mut HandlerContext {
                state: &mut self.state,
                config: &self.config,
                events: &mut *events,
            },
            &effect,
        );
        debug!(effect = %effect.effect_type, by = %effect.played_by, ?outcome, "effect applied");

        match outcome {
            HandlerOutcome::Continue => {
                self.state.effects.finish();
                true
            }
            HandlerOutcome::AwaitChoice => false,
            HandlerOutcome::Collect(request) => {
                self.state.effects.finish();
                self.start_collection(request.then(Continuation::ResumeEffectQueue), events);
                false
            }
            HandlerOutcome::StartDataGrab => {
                self.state.effects.finish();
                self.start_data_grab(events);
                false
            }
            HandlerOutcome::Inline(kind) => {
                self.state.effects.finish();
                self.register(Continuation::ResumeEffectQueue);
                self.enqueue_animation(kind, effect.played_by, events);
                false
            }
        }
    }

    /// Queue drained: collect the whole board for the turn.
    fn start_turn_collection(&mut self, events: &mut Vec<EngineEvent>) {
        if self.state.turn.phase != TurnPhase::ProcessingEffects {
            return;
        }
        self.state.turn.phase = TurnPhase::Collecting;

        let destination = self
            .state
            .turn
            .board_destination_override
            .or(self.state.turn.winner());
        let distributions = match destination {
            Some(to) => board_distributions(&self.state.players, to),
            None => own_side_distributions(&self.state.players),
        };
        let rockets = distributions
            .iter()
            .filter(|d| self.state.effects.is_claimed(d.card.id))
            .count() as u32;

        let mut request = CollectionRequest::new(distributions)
            .with_launch_stacks(rockets)
            .ending_turn();
        if let Some(to) = destination {
            request = request.winner(to);
        }
        self.start_collection(request, events);
    }

    // === Animations ===

    pub(super) fn enqueue_animation(
        &mut self,
        kind: AnimationKind,
        played_by: PlayerId,
        events: &mut Vec<EngineEvent>,
    ) {
        let entry = AnimationQueueEntry { kind, played_by };
        if self.state.animations.enqueue(entry, &mut self.state.lock) {
            self.play_next_animation(events);
        }
    }

    pub(super) fn play_next_animation(&mut self, events: &mut Vec<EngineEvent>) {
        match self.state.animations.play_next() {
            Playback::Show(entry) => {
                debug!(kind = ?entry.kind, by = %entry.played_by, "animation shown");
                events.push(EngineEvent::AnimationStarted {
                    kind: entry.kind,
                    played_by: entry.played_by,
                });
                events.push(EngineEvent::Audio(AudioTrack::for_animation(entry.kind)));
                self.schedule(
                    self.config.timings.effect_animation_ms,
                    Task::HideAnimation { kind: entry.kind },
                );
            }
            Playback::Drained => {
                self.state.animations.drain_complete(&mut self.state.lock);
                if !self.state.lock.is_blocked() {
                    events.push(EngineEvent::TransitionsUnblocked);
                }
                self.try_resume(events);
            }
        }
    }

    pub(super) fn hide_animation(&mut self, kind: AnimationKind, events: &mut Vec<EngineEvent>) {
        if !self.state.animations.hide(kind) {
            warn!(?kind, "hide for an animation that isn't showing");
            return;
        }
        events.push(EngineEvent::AnimationFinished { kind });
        self.schedule(self.config.timings.inter_animation_gap_ms, Task::PlayNextAnimation);
    }

    // === Temper Tantrum ===

    pub(super) fn confirm_tantrum(
        &mut self,
        keep: &[CardId],
        events: &mut Vec<EngineEvent>,
    ) -> Result<(), EngineError> {
        let Some(tantrum) = self.state.tantrum.clone() else {
            return Err(EngineError::NoChoiceOpen("temper tantrum"));
        };
        let selected = tantrum.validate(keep)?;

        self.state.tantrum = None;
        let animated = tantrum.apply(&mut self.state, &selected);
        self.state.effects.finish();
        info!(winner = %tantrum.winner, kept = selected.len(), "temper tantrum settled");
        events.push(EngineEvent::ChoiceConfirmed {
            choice: ChoiceKind::TemperTantrum,
            player: tantrum.winner,
        });

        let request = CollectionRequest::new(animated)
            .winner(tantrum.winner)
            .visual_only()
            .skip_board_clear()
            .then(Continuation::ResumeEffectQueue);
        self.start_collection(request, events);
        self.release(LockReason::PlayerChoice, events);
        Ok(())
    }

    // === Open What You Want ===

    pub(super) fn confirm_open_what_you_want(
        &mut self,
        order: &[CardId],
        events: &mut Vec<EngineEvent>,
    ) -> Result<(), EngineError> {
        let Some(open) = self.state.open_what_you_want.clone() else {
            return Err(EngineError::NoChoiceOpen("open what you want"));
        };
        open.apply(self.state.player_mut(open.player), order)?;

        self.state.open_what_you_want = None;
        self.state.effects.finish();
        debug!(player = %open.player, ?order, "deck reordered");
        events.push(EngineEvent::ChoiceConfirmed {
            choice: ChoiceKind::OpenWhatYouWant,
            player: open.player,
        });

        self.register(Continuation::ResumeEffectQueue);
        self.release(LockReason::PlayerChoice, events);
        Ok(())
    }

    // === Data Grab ===

    fn start_data_grab(&mut self, events: &mut Vec<EngineEvent>) {
        let grab = DataGrabState::open(&mut self.state.players);
        let pool = grab.pool.len();
        self.state.data_grab = Some(grab);
        self.state.lock.acquire(LockReason::DataGrab);
        self.schedule(self.config.timings.data_grab_window_ms, Task::CloseDataGrab);

        info!(pool, "data grab");
        events.push(EngineEvent::DataGrabStarted { pool });
        events.push(EngineEvent::Audio(AudioTrack::DataGrab));
    }

    pub(super) fn close_data_grab(&mut self, events: &mut Vec<EngineEvent>) {
        let Some(grab) = self.state.data_grab.as_mut().filter(|g| g.is_open()) else {
            warn!("data grab close without an open window");
            return;
        };
        let results = grab.close(&mut self.state.players, &mut self.state.effects);

        self.state.lock.acquire(LockReason::ResultsModal);
        self.state.lock.release(LockReason::DataGrab);
        self.schedule(self.config.timings.data_grab_restore_delay_ms, Task::RestoreDataGrabBoard);

        info!(
            player = results.collected[PlayerId::Player].len(),
            cpu = results.collected[PlayerId::Cpu].len(),
            "data grab closed"
        );
        events.push(EngineEvent::DataGrabFinished { results });
    }

    pub(super) fn restore_data_grab(&mut self, events: &mut Vec<EngineEvent>) {
        let Some(grab) = self
            .state
            .data_grab
            .as_mut()
            .filter(|g| !g.is_open() && !g.restored)
        else {
            warn!("nothing to restore after data grab");
            return;
        };
        let launch_stacks = grab.restore(&mut self.state.players);
        events.push(EngineEvent::DataGrabBoardRestored { launch_stacks });

        self.register(Continuation::ResumeEffectQueue);
        self.try_resume(events);
    }

    // === Game over ===

    pub(super) fn finish_game(&mut self, events: &mut Vec<EngineEvent>) {
        let Some(win) = self.state.win else {
            return;
        };
        if self.state.turn.phase == TurnPhase::GameOver {
            return;
        }
        self.state.turn.phase = TurnPhase::GameOver;
        self.state.effects.clear_turn();
        self.state.continuation.clear();

        events.push(EngineEvent::GameOver(win));
        events.push(EngineEvent::Audio(if win.winner == PlayerId::Player {
            AudioTrack::Victory
        } else {
            AudioTrack::Defeat
        }));
    }
}

/// Board cards of both sides, each returned to its own side.
fn own_side_distributions(players: &PlayerMap<Player>) -> Vec<CardDistribution> {
    players
        .iter()
        .flat_map(|(side, p)| {
            p.played_cards_in_hand
                .iter()
                .map(move |played| CardDistribution::from_board(played.card, side))
        })
        .collect()
}
