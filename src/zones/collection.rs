//! Card collection and distribution.
//!
//! A collection moves cards between the board and the decks according to
//! a list of `(card, source, destination)` distributions. Launch Stacks
//! with a claim are routed to a Launch-Stack pile instead of a deck.
//!
//! ## Lifecycle
//!
//! The engine starts a collection (`CollectionTracker::start`), waits out
//! its flight duration on the scheduler, then `settle`s it. Settling is
//! idempotent per card: a card that is no longer at its source is skipped,
//! so settling the same distributions twice moves each card once.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animation::Continuation;
use crate::cards::{Card, CardId, PlayedCardState};
use crate::core::{Player, PlayerId, PlayerMap, Timings};
use crate::resolution::LaunchStackClaim;

/// Where a distributed card currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    /// Either side's board.
    Board,
    /// A side's deck (Leveraged Buyout).
    Deck(PlayerId),
}

/// One card movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDistribution {
    pub card: Card,
    pub source: CardSource,
    pub destination: PlayerId,
}

impl CardDistribution {
    #[must_use]
    pub const fn from_board(card: Card, destination: PlayerId) -> Self {
        Self {
            card,
            source: CardSource::Board,
            destination,
        }
    }

    #[must_use]
    pub const fn from_deck(card: Card, owner: PlayerId, destination: PlayerId) -> Self {
        Self {
            card,
            source: CardSource::Deck(owner),
            destination,
        }
    }
}

/// Unique identifier for an in-flight collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub u32);

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Collection({})", self.0)
    }
}

/// Everything needed to animate and settle one collection.
///
/// ## Example
///
/// ```
/// use data_war::cards::{Card, CardId};
/// use data_war::core::{PlayerId, Timings};
/// use data_war::zones::{CardDistribution, CollectionRequest};
///
/// let card = Card::new(CardId::new(1), 5);
/// let request = CollectionRequest::new(vec![CardDistribution::from_board(card, PlayerId::Player)])
///     .winner(PlayerId::Player)
///     .with_launch_stacks(2);
///
/// let timings = Timings::default();
/// assert_eq!(request.duration(&timings), 600 + 2 * 1200 + 250);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionRequest {
    pub distributions: Vec<CardDistribution>,

    /// Receives board stragglers not covered by a distribution.
    pub primary_winner: Option<PlayerId>,

    /// Decks were already updated by the caller; only animate.
    pub visual_only: bool,

    /// Rockets to animate.
    pub launch_stack_count: u32,

    /// Leave the rest of the board for a later collection.
    pub skip_board_clear: bool,

    /// This is the turn's final collection.
    pub ends_turn: bool,

    /// Resume step once the collection has settled.
    pub then: Option<Continuation>,
}

impl CollectionRequest {
    #[must_use]
    pub fn new(distributions: Vec<CardDistribution>) -> Self {
        Self {
            distributions,
            primary_winner: None,
            visual_only: false,
            launch_stack_count: 0,
            skip_board_clear: false,
            ends_turn: false,
            then: None,
        }
    }

    #[must_use]
    pub fn winner(mut self, winner: PlayerId) -> Self {
        self.primary_winner = Some(winner);
        self
    }

    #[must_use]
    pub fn visual_only(mut self) -> Self {
        self.visual_only = true;
        self
    }

    #[must_use]
    pub fn skip_board_clear(mut self) -> Self {
        self.skip_board_clear = true;
        self
    }

    #[must_use]
    pub fn with_launch_stacks(mut self, count: u32) -> Self {
        self.launch_stack_count = count;
        self
    }

    #[must_use]
    pub fn ending_turn(mut self) -> Self {
        self.ends_turn = true;
        self
    }

    #[must_use]
    pub fn then(mut self, next: Continuation) -> Self {
        self.then = Some(next);
        self
    }

    /// Flight time: base duration plus the rocket sequence.
    #[must_use]
    pub fn duration(&self, timings: &Timings) -> u64 {
        timings.collection_base_ms + timings.rocket_duration(self.launch_stack_count)
    }
}

/// Collections waiting for their flight time to end.
#[derive(Clone, Debug, Default)]
pub struct CollectionTracker {
    next_id: u32,
    in_flight: Vec<(CollectionId, CollectionRequest)>,
}

impl CollectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, request: CollectionRequest) -> CollectionId {
        let id = CollectionId(self.next_id);
        self.next_id += 1;
        self.in_flight.push((id, request));
        id
    }

    /// Remove a collection. `None` if it already settled.
    pub fn take(&mut self, id: CollectionId) -> Option<CollectionRequest> {
        let pos = self.in_flight.iter().position(|(i, _)| *i == id)?;
        Some(self.in_flight.remove(pos).1)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

/// What a settle actually did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Cards moved, in distribution order.
    pub collected: Vec<CardId>,
    /// Launch Stacks added to each pile.
    pub launch_stacks: PlayerMap<u32>,
    /// Cards not found at their source.
    pub skipped: usize,
}

/// Apply a collection to the players.
///
/// Claimed Launch Stacks go to `claim.owner(turn_winner)`; every other
/// card is appended to its destination deck. Unless `skip_board_clear`
/// is set, the board and all per-turn values are cleared for both sides
/// afterwards; any board card no distribution mentioned goes to the
/// primary winner (or back to its own side's deck).
pub fn settle(
    players: &mut PlayerMap<Player>,
    request: &CollectionRequest,
    claims: &[LaunchStackClaim],
    turn_winner: Option<PlayerId>,
) -> Settlement {
    let mut settlement = Settlement::default();
    let mut seen: FxHashSet<CardId> = FxHashSet::default();

    for dist in &request.distributions {
        let id = dist.card.id;
        if !seen.insert(id) {
            warn!(card = %id, "card appears twice in one collection, ignoring repeat");
            continue;
        }
        if request.visual_only {
            settlement.collected.push(id);
            continue;
        }

        let taken = match dist.source {
            CardSource::Board => take_from_board(players, id),
            CardSource::Deck(owner) => players[owner].take_from_deck(id),
        };
        let Some(card) = taken else {
            debug!(card = %id, "card already collected");
            settlement.skipped += 1;
            continue;
        };

        match claims.iter().find(|c| c.card == id) {
            Some(claim) => {
                let owner = claim.owner(turn_winner);
                players[owner].add_launch_stack(card);
                settlement.launch_stacks[owner] += 1;
            }
            None => players[dist.destination].deck.push_back(card),
        }
        settlement.collected.push(id);
    }

    if !request.skip_board_clear {
        if request.visual_only {
            clear_settled_board(players);
        } else {
            clear_board(players, request.primary_winner);
        }
    }

    settlement
}

fn take_from_board(players: &mut PlayerMap<Player>, id: CardId) -> Option<Card> {
    PlayerId::all().find_map(|side| players[side].remove_from_board(id).map(|p| p.card))
}

fn clear_board(players: &mut PlayerMap<Player>, primary_winner: Option<PlayerId>) {
    let mut stragglers: Vec<(PlayerId, Card)> = Vec::new();
    for (side, player) in players.iter_mut() {
        stragglers.extend(player.take_board().into_iter().map(|p| (side, p.card)));
        player.clear_turn();
    }
    for (side, card) in stragglers {
        let destination = primary_winner.unwrap_or(side);
        warn!(card = %card.id, %destination, "board card missing from collection");
        players[destination].deck.push_back(card);
    }
}

// Visual-only: the decks are already authoritative. Board cards that also
// sit in a deck or pile are display copies and are dropped; anything else
// stays in play for a later collection.
fn clear_settled_board(players: &mut PlayerMap<Player>) {
    let settled: FxHashSet<CardId> = players
        .iter()
        .flat_map(|(_, p)| p.deck.iter().chain(p.launch_stack_pile().iter()).map(|c| c.id))
        .collect();
    for (side, player) in players.iter_mut() {
        let copies: Vec<CardId> = player
            .played_cards_in_hand
            .iter()
            .map(PlayedCardState::id)
            .filter(|id| settled.contains(id))
            .collect();
        for id in copies {
            player.remove_from_board(id);
        }
        if player.played_cards_in_hand.is_empty() {
            player.clear_turn();
        } else {
            debug!(%side, left = player.board_len(), "visual-only collection left cards in play");
        }
    }
}

/// Every card on the board, sent to `destination`.
#[must_use]
pub fn board_distributions(
    players: &PlayerMap<Player>,
    destination: PlayerId,
) -> Vec<CardDistribution> {
    players
        .iter()
        .flat_map(|(_, p)| p.played_cards_in_hand.iter())
        .map(|played| CardDistribution::from_board(played.card, destination))
        .collect()
}
