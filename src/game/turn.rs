//! Plays, war hands and turn resolution.

use tracing::{debug, info, warn};

use super::{AudioTrack, Engine, EngineEvent};
use crate::animation::AnimationKind;
use crate::cards::PlayedCardState;
use crate::core::{EngineError, PlayerId, TurnPhase};
use crate::rules::{check_for_data_war, compare, refresh_turn_values, TurnOutcome};

impl Engine {
    fn accepts_plays(&self) -> bool {
        matches!(self.state.turn.phase, TurnPhase::AwaitingPlays | TurnPhase::DataWar)
    }

    pub(super) fn play_card(
        &mut self,
        side: PlayerId,
        events: &mut Vec<EngineEvent>,
    ) -> Result<(), EngineError> {
        let player = self.state.player(side);
        let needs_card = match player.played_card {
            Some(card) => card.requires_follow_up(),
            None => true,
        };
        if !self.accepts_plays() || self.state.turn.awaiting_war_hand[side] || !needs_card {
            return Err(EngineError::CannotPlay(side));
        }

        let Some(card) = self.state.player_mut(side).draw() else {
            return Err(EngineError::CannotPlay(side));
        };
        self.state.player_mut(side).place(PlayedCardState::face_up(card));
        debug!(%side, %card, "card played");

        events.push(EngineEvent::CardPlayed {
            player: side,
            card,
            face_down: false,
        });
        events.push(EngineEvent::Audio(AudioTrack::CardFlip));
        Ok(())
    }

    /// Commit the war hand: face-down cards, then one face-up card.
    pub(super) fn play_war_hand(
        &mut self,
        side: PlayerId,
        events: &mut Vec<EngineEvent>,
    ) -> Result<(), EngineError> {
        if self.state.turn.phase != TurnPhase::DataWar || !self.state.turn.awaiting_war_hand[side] {
            return Err(EngineError::CannotPlay(side));
        }

        let face_down = self.config.war_face_down_count;
        let player = self.state.player_mut(side);
        let mut committed = Vec::with_capacity(face_down + 1);
        for _ in 0..face_down {
            let Some(card) = player.draw() else { break };
            player.place(PlayedCardState::face_down(card));
            committed.push(PlayedCardState::face_down(card));
        }
        if let Some(card) = player.draw() {
            player.place(PlayedCardState::face_up(card));
            committed.push(PlayedCardState::face_up(card));
        }

        if committed.len() <= face_down {
            warn!(%side, cards = committed.len(), "short war hand");
        }
        self.state.turn.awaiting_war_hand[side] = false;
        debug!(%side, cards = committed.len(), "war hand played");

        events.extend(committed.into_iter().map(|played| EngineEvent::CardPlayed {
            player: side,
            card: played.card,
            face_down: played.is_face_down,
        }));
        events.push(EngineEvent::Audio(AudioTrack::CardFlip));
        Ok(())
    }

    pub(super) fn resolve_turn(
        &mut self,
        events: &mut Vec<EngineEvent>,
    ) -> Result<(), EngineError> {
        let turn = &self.state.turn;
        let ready = self.state.players.iter().all(|(_, p)| p.is_ready());
        let anything_played = self.state.players.iter().any(|(_, p)| p.has_card_in_play());
        if !self.accepts_plays() || turn.owes_war_hand() || !ready || !anything_played {
            return Err(EngineError::NotReady);
        }

        self.activate_hostile_takeover();
        refresh_turn_values(&mut self.state, &self.config);

        let war = check_for_data_war(&mut self.state, &self.config);
        if self.state.is_over() {
            self.finish_game(events);
            return Ok(());
        }

        if war {
            self.state.turn.phase = TurnPhase::DataWar;
            events.push(EngineEvent::DataWarStarted {
                stage: self.state.turn.war_stage,
                hostile_takeover: self.state.turn.hostile_takeover_data_war,
            });
            let by = self.state.turn.hostile_takeover_by.unwrap_or(PlayerId::Player);
            self.enqueue_animation(AnimationKind::DataWar, by, events);
            return Ok(());
        }

        let player = self.state.player(PlayerId::Player);
        let cpu = self.state.player(PlayerId::Cpu);
        let outcome = compare(player, cpu);
        let (player_value, cpu_value) = (player.current_turn_value, cpu.current_turn_value);
        if outcome == TurnOutcome::Tie {
            warn!(player_value, cpu_value, "turn settled as a tie, cards return to their owners");
        }
        info!(turn = self.state.turn.number, %outcome, player_value, cpu_value, "turn resolved");

        self.state.turn.outcome = Some(outcome);
        self.state.turn.phase = TurnPhase::ProcessingEffects;
        events.push(EngineEvent::TurnResolved {
            outcome,
            player_value,
            cpu_value,
        });

        let queued = self.state.effects.queue_board(&self.state.players);
        debug!(queued, "effects queued");
        self.pump(events);
        Ok(())
    }

    /// A face-up Hostile Takeover on top of one side's board takes over
    /// the turn, unless both sides show one or the opponent holds a
    /// tracker smacker.
    fn activate_hostile_takeover(&mut self) {
        if self.state.turn.hostile_takeover_by.is_some() {
            return;
        }
        let shows = |side: PlayerId| {
            self.state
                .player(side)
                .played_card
                .is_some_and(|c| c.is_hostile_takeover())
        };
        let side = match (shows(PlayerId::Player), shows(PlayerId::Cpu)) {
            (true, false) => PlayerId::Player,
            (false, true) => PlayerId::Cpu,
            _ => return,
        };
        if self.state.player(side.opponent()).has_tracker_smacker() {
            debug!(%side, "hostile takeover smacked");
            return;
        }
        info!(%side, "hostile takeover");
        self.state.turn.hostile_takeover_by = Some(side);
    }
}
