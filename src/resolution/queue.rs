//! Effect queue bookkeeping.
//!
//! A FIFO of pending effects with exactly one entry in flight at a time,
//! the Launch-Stack claims produced while draining it, and the set of card
//! ids whose animation has already been shown this turn.
//!
//! The processor that drains the queue lives in `game::processor`; this
//! module only owns the data and its invariants.

use std::collections::VecDeque;

use im::HashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, SpecialType};
use crate::core::{Player, PlayerId, PlayerMap};
use crate::effects::PendingEffect;

/// A face-up Launch Stack whose effect has been processed.
///
/// The card stays on the board until the turn's collection, which routes
/// it to `destination_override` if set, else to the turn winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchStackClaim {
    pub card: CardId,
    pub played_by: PlayerId,
    pub destination_override: Option<PlayerId>,
}

impl LaunchStackClaim {
    #[must_use]
    pub fn from_effect(effect: &PendingEffect) -> Self {
        Self {
            card: effect.card_id(),
            played_by: effect.played_by,
            destination_override: effect.destination_override,
        }
    }

    /// Whose pile the card lands in.
    #[must_use]
    pub fn owner(&self, turn_winner: Option<PlayerId>) -> PlayerId {
        self.destination_override
            .or(turn_winner)
            .unwrap_or(self.played_by)
    }
}

/// Pending effects of the current turn.
#[derive(Clone, Debug, Default)]
pub struct EffectQueue {
    pending: VecDeque<PendingEffect>,
    in_flight: Option<PendingEffect>,
    claims: Vec<LaunchStackClaim>,
    shown: HashSet<CardId>,
}

impl EffectQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every face-up special on the board: player's first, then
    /// the CPU's, board order within a side.
    pub fn queue_board(&mut self, players: &PlayerMap<Player>) -> usize {
        let before = self.pending.len();
        for (id, player) in players.iter() {
            self.pending.extend(
                player
                    .played_cards_in_hand
                    .iter()
                    .filter_map(|played| PendingEffect::from_played(played, id)),
            );
        }
        self.pending.len() - before
    }

    pub fn push(&mut self, effect: PendingEffect) {
        self.pending.push_back(effect);
    }

    /// Pop the head. Refuses while another entry is in flight.
    pub fn pop(&mut self) -> Option<PendingEffect> {
        if self.in_flight.is_some() {
            return None;
        }
        self.pending.pop_front()
    }

    /// Mark `effect` as the entry being processed.
    pub fn begin(&mut self, effect: PendingEffect) {
        debug_assert!(self.in_flight.is_none());
        self.in_flight = Some(effect);
    }

    /// The in-flight entry is done.
    pub fn finish(&mut self) -> Option<PendingEffect> {
        self.in_flight.take()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<&PendingEffect> {
        self.in_flight.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Nothing queued and nothing in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.in_flight.is_none()
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingEffect> {
        self.pending.iter()
    }

    // === Shown set ===

    #[must_use]
    pub fn was_shown(&self, card: CardId) -> bool {
        self.shown.contains(&card)
    }

    /// Record that `effect`'s animation is showing.
    ///
    /// If the other side has a queued effect of the same type, its card is
    /// marked too: one animation covers both.
    pub fn mark_shown(&mut self, effect: &PendingEffect) {
        let partner = self
            .pending
            .iter()
            .find(|p| p.effect_type == effect.effect_type && p.played_by != effect.played_by)
            .map(PendingEffect::card_id);

        let mut shown = self.shown.update(effect.card_id());
        if let Some(partner) = partner {
            shown = shown.update(partner);
        }
        self.shown = shown;
    }

    // === Launch-Stack claims ===

    pub fn claim(&mut self, claim: LaunchStackClaim) {
        if self.claims.iter().any(|c| c.card == claim.card) {
            return;
        }
        self.claims.push(claim);
    }

    #[must_use]
    pub fn claims(&self) -> &[LaunchStackClaim] {
        &self.claims
    }

    #[must_use]
    pub fn is_claimed(&self, card: CardId) -> bool {
        self.claims.iter().any(|c| c.card == card)
    }

    /// Redirect a Launch Stack, queued or already claimed.
    pub fn override_destination(&mut self, card: CardId, destination: PlayerId) -> bool {
        let mut found = false;
        for effect in self.pending.iter_mut().filter(|e| e.card_id() == card) {
            effect.destination_override = Some(destination);
            found = true;
        }
        for claim in self.claims.iter_mut().filter(|c| c.card == card) {
            claim.destination_override = Some(destination);
            found = true;
        }
        found
    }

    /// Drop every queued effect except the Launch Stacks `keep` accepts.
    /// Returns how many were discarded.
    pub fn retain_launch_stacks(&mut self, keep: impl Fn(CardId) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| {
            e.effect_type == SpecialType::LaunchStack && keep(e.card_id())
        });
        before - self.pending.len()
    }

    /// Turn is over: forget everything, the shown set included.
    pub fn clear_turn(&mut self) {
        self.pending.clear();
        self.in_flight = None;
        self.claims.clear();
        self.shown = HashSet::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, PlayedCardState};

    fn board() -> PlayerMap<Player> {
        let mut players = PlayerMap::new(|id| Player::new(id, Vec::new()));
        players[PlayerId::Cpu].place(PlayedCardState::face_up(Card::special(
            CardId::new(10),
            SpecialType::PatentTheft,
            3,
        )));
        players[PlayerId::Player].place(PlayedCardState::face_up(Card::special(
            CardId::new(1),
            SpecialType::LaunchStack,
            0,
        )));
        players[PlayerId::Player].place(PlayedCardState::face_down(Card::special(
            CardId::new(2),
            SpecialType::MandatoryRecall,
            5,
        )));
        players[PlayerId::Player].place(PlayedCardState::face_up(Card::special(
            CardId::new(3),
            SpecialType::PatentTheft,
            3,
        )));
        players
    }

    #[test]
    fn test_queue_board_order() {
        let mut queue = EffectQueue::new();
        assert_eq!(queue.queue_board(&board()), 3);

        let order: Vec<_> = queue.pending().map(|e| (e.played_by, e.card_id())).collect();
        assert_eq!(
            order,
            vec![
                (PlayerId::Player, CardId::new(1)),
                (PlayerId::Player, CardId::new(3)),
                (PlayerId::Cpu, CardId::new(10)),
            ]
        );
    }

    #[test]
    fn test_one_in_flight() {
        let mut queue = EffectQueue::new();
        queue.queue_board(&board());

        let first = queue.pop().unwrap();
        queue.begin(first);
        assert!(queue.pop().is_none());

        queue.finish();
        assert!(queue.pop().is_some());
    }

    #[test]
    fn test_mark_shown_covers_same_type_partner() {
        let mut queue = EffectQueue::new();
        queue.queue_board(&board());
        let _launch = queue.pop().unwrap();
        let theft = queue.pop().unwrap();

        queue.mark_shown(&theft);

        assert!(queue.was_shown(CardId::new(3)));
        assert!(queue.was_shown(CardId::new(10)));
        assert!(!queue.was_shown(CardId::new(1)));
    }

    #[test]
    fn test_override_destination_hits_queue_and_claims() {
        let mut queue = EffectQueue::new();
        queue.queue_board(&board());
        let launch = queue.pop().unwrap();
        queue.claim(LaunchStackClaim::from_effect(&launch));

        assert!(queue.override_destination(CardId::new(1), PlayerId::Cpu));
        assert_eq!(queue.claims()[0].owner(Some(PlayerId::Player)), PlayerId::Cpu);
        assert!(!queue.override_destination(CardId::new(99), PlayerId::Cpu));
    }

    #[test]
    fn test_claim_owner_falls_back_to_winner() {
        let claim = LaunchStackClaim {
            card: CardId::new(5),
            played_by: PlayerId::Player,
            destination_override: None,
        };
        assert_eq!(claim.owner(Some(PlayerId::Cpu)), PlayerId::Cpu);
        assert_eq!(claim.owner(None), PlayerId::Player);
    }

    #[test]
    fn test_retain_launch_stacks() {
        let mut queue = EffectQueue::new();
        queue.queue_board(&board());

        let dropped = queue.retain_launch_stacks(|id| id == CardId::new(1));

        assert_eq!(dropped, 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear_turn() {
        let mut queue = EffectQueue::new();
        queue.queue_board(&board());
        let first = queue.pop().unwrap();
        queue.mark_shown(&first);
        queue.claim(LaunchStackClaim::from_effect(&first));

        queue.clear_turn();

        assert!(queue.is_idle());
        assert!(queue.claims().is_empty());
        assert!(!queue.was_shown(CardId::new(1)));
    }
}
