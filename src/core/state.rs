//! Game state: the shared store every component reads and mutates.
//!
//! ## Player
//!
//! One record per side: deck, board, turn values, Launch-Stack pile and
//! the active effects of the cards currently in play.
//!
//! ## GameState
//!
//! Both players plus all turn, queue, animation, lock and sub-game state.
//! Uses `im` persistent collections so read-only snapshots for the
//! rendering layer are O(1) clones.
//!
//! A `GameState` is created per game and replaced wholesale on reset;
//! nothing is torn down piecemeal.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::animation::{AnimationOrchestrator, ContinuationSlot, TransitionLock};
use crate::cards::{Card, CardId, PlayedCardState, SpecialType};
use crate::resolution::EffectQueue;
use crate::rules::{TurnOutcome, WinState};
use crate::subgames::{DataGrabState, OpenWhatYouWantState, TemperTantrumState};
use crate::zones::CollectionTracker;

/// A special card currently in play for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub card: CardId,
    pub special: SpecialType,
    pub value: u8,
}

impl ActiveEffect {
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            card: card.id,
            special: card.special,
            value: card.value,
        }
    }

    /// Tracker or blocker (tracker smackers included).
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        matches!(self.special, SpecialType::Tracker | SpecialType::Blocker)
    }

    #[must_use]
    pub fn is_tracker_smacker(&self) -> bool {
        self.special == SpecialType::Blocker && self.value == 0
    }
}

/// One side of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    /// Front = next card to draw.
    pub deck: Vector<Card>,

    /// Top card of this side's board stack.
    pub played_card: Option<Card>,

    /// Everything this side has on the board this turn, in play order.
    pub played_cards_in_hand: Vector<PlayedCardState>,

    /// Effective value for the comparator.
    pub current_turn_value: i32,

    launch_stack_count: u32,

    launch_stack_pile: Vector<Card>,

    pub active_effects: Vector<ActiveEffect>,

    /// Sum of this side's tracker values.
    pub pending_tracker_bonus: i32,

    /// Sum of the opponent's blocker values.
    pub pending_blocker_penalty: i32,
}

impl Player {
    /// Create a player with the given deck.
    #[must_use]
    pub fn new(id: PlayerId, deck: impl IntoIterator<Item = Card>) -> Self {
        Self {
            id,
            deck: deck.into_iter().collect(),
            played_card: None,
            played_cards_in_hand: Vector::new(),
            current_turn_value: 0,
            launch_stack_count: 0,
            launch_stack_pile: Vector::new(),
            active_effects: Vector::new(),
            pending_tracker_bonus: 0,
            pending_blocker_penalty: 0,
        }
    }

    // === Deck ===

    /// Take the front card of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.deck.pop_front()
    }

    /// Remove a specific card from the deck.
    pub fn take_from_deck(&mut self, id: CardId) -> Option<Card> {
        let pos = self.deck.iter().position(|c| c.id == id)?;
        Some(self.deck.remove(pos))
    }

    // === Board ===

    /// Put a card on the board.
    ///
    /// Face-up cards become the played card and register an active
    /// effect when they are special.
    pub fn place(&mut self, played: PlayedCardState) {
        if !played.is_face_down {
            self.played_card = Some(played.card);
            if played.card.special.is_special() {
                self.active_effects.push_back(ActiveEffect::from_card(&played.card));
            }
        }
        self.played_cards_in_hand.push_back(played);
    }

    /// Number of cards this side has on the board.
    #[must_use]
    pub fn board_len(&self) -> usize {
        self.played_cards_in_hand.len()
    }

    /// Does this side have any card in play?
    #[must_use]
    pub fn has_card_in_play(&self) -> bool {
        !self.played_cards_in_hand.is_empty()
    }

    /// Can the turn resolve as far as this side is concerned?
    ///
    /// A side is ready once its top card is a value card. A side that
    /// can't draw any more is ready by default.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self.played_card {
            Some(card) if !card.requires_follow_up() => true,
            _ => self.deck.is_empty(),
        }
    }

    /// Remove a card from the board. Clears the played card if it was it.
    pub fn remove_from_board(&mut self, id: CardId) -> Option<PlayedCardState> {
        let pos = self.played_cards_in_hand.iter().position(|p| p.id() == id)?;
        let removed = self.played_cards_in_hand.remove(pos);
        if self.played_card.map(|c| c.id) == Some(id) {
            self.played_card = None;
        }
        Some(removed)
    }

    /// Take every board card at once, leaving the board empty.
    pub fn take_board(&mut self) -> Vec<PlayedCardState> {
        self.played_card = None;
        std::mem::take(&mut self.played_cards_in_hand).into_iter().collect()
    }

    /// Reset everything that only lives for one turn.
    ///
    /// Callers must have moved every board card elsewhere first.
    pub fn clear_turn(&mut self) {
        debug_assert!(self.played_cards_in_hand.is_empty());
        self.played_card = None;
        self.played_cards_in_hand.clear();
        self.current_turn_value = 0;
        self.active_effects.clear();
        self.pending_tracker_bonus = 0;
        self.pending_blocker_penalty = 0;
    }

    // === Active effects ===

    #[must_use]
    pub fn has_tracker_smacker(&self) -> bool {
        self.active_effects.iter().any(ActiveEffect::is_tracker_smacker)
    }

    /// Sum of the values of active effects of one special type.
    #[must_use]
    pub fn active_total(&self, special: SpecialType) -> i32 {
        self.active_effects
            .iter()
            .filter(|e| e.special == special)
            .map(|e| i32::from(e.value))
            .sum()
    }

    /// Drop tracker and blocker effects, keeping every other effect.
    pub fn strip_modifier_effects(&mut self) {
        let kept: Vector<ActiveEffect> = self
            .active_effects
            .iter()
            .filter(|e| !e.is_modifier())
            .copied()
            .collect();
        self.active_effects = kept;
        self.pending_tracker_bonus = 0;
    }

    // === Launch Stacks ===

    #[must_use]
    pub fn launch_stack_count(&self) -> u32 {
        self.launch_stack_count
    }

    #[must_use]
    pub fn launch_stack_pile(&self) -> &Vector<Card> {
        &self.launch_stack_pile
    }

    /// Add a Launch Stack to the pile. Count and pile move together.
    pub fn add_launch_stack(&mut self, card: Card) {
        self.launch_stack_pile.push_back(card);
        self.launch_stack_count += 1;
    }

    /// Remove the most recently added Launch Stack.
    pub fn take_launch_stack(&mut self) -> Option<Card> {
        let card = self.launch_stack_pile.pop_back()?;
        self.launch_stack_count -= 1;
        Some(card)
    }

    /// Empty the pile.
    pub fn drain_launch_stacks(&mut self) -> Vec<Card> {
        self.launch_stack_count = 0;
        std::mem::take(&mut self.launch_stack_pile).into_iter().collect()
    }

    /// Every card id this side holds: deck, board and pile.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck
            .iter()
            .map(|c| c.id)
            .chain(self.played_cards_in_hand.iter().map(PlayedCardState::id))
            .chain(self.launch_stack_pile.iter().map(|c| c.id))
    }
}

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for both sides to play.
    #[default]
    AwaitingPlays,
    /// A Data War is on; some side still owes a war hand or a follow-up.
    DataWar,
    /// Turn decided; the effect queue (and its sub-games) is running.
    ProcessingEffects,
    /// The turn's board collection is in flight.
    Collecting,
    /// A winner has been recorded.
    GameOver,
}

/// Per-turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Turn number, starting at 1.
    pub number: u32,

    pub phase: TurnPhase,

    /// Set once the turn is decided.
    pub outcome: Option<TurnOutcome>,

    /// Side whose Hostile Takeover is in play.
    pub hostile_takeover_by: Option<PlayerId>,

    /// The opponent of the Hostile Takeover owes a war hand.
    pub hostile_takeover_data_war: bool,

    /// Number of Data-War rounds this turn.
    pub war_stage: u32,

    /// Sides that still owe a war hand.
    pub awaiting_war_hand: PlayerMap<bool>,

    /// Destination for the remaining board cards, overriding the winner
    /// (set by Temper Tantrum).
    pub board_destination_override: Option<PlayerId>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            number: 1,
            phase: TurnPhase::AwaitingPlays,
            outcome: None,
            hostile_takeover_by: None,
            hostile_takeover_data_war: false,
            war_stage: 0,
            awaiting_war_hand: PlayerMap::with_value(false),
            board_destination_override: None,
        }
    }
}

impl TurnState {
    /// The decided winner of this turn, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.and_then(TurnOutcome::winner)
    }

    /// Does anyone still owe a war hand?
    #[must_use]
    pub fn owes_war_hand(&self) -> bool {
        self.awaiting_war_hand.iter().any(|(_, owes)| *owes)
    }

    /// Start the next turn.
    pub fn advance(&mut self) {
        let number = self.number + 1;
        *self = Self {
            number,
            ..Self::default()
        };
    }
}

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: PlayerMap<Player>,

    pub turn: TurnState,

    /// Pending special-card effects.
    pub effects: EffectQueue,

    pub animations: AnimationOrchestrator,

    /// Reason-tagged "block transitions" lock.
    pub lock: TransitionLock,

    /// At most one pending resume step.
    pub continuation: ContinuationSlot,

    pub collections: CollectionTracker,

    pub data_grab: Option<DataGrabState>,

    pub tantrum: Option<TemperTantrumState>,

    pub open_what_you_want: Option<OpenWhatYouWantState>,

    pub win: Option<WinState>,

    /// Bumped on every reset; timers from older epochs are ignored.
    pub epoch: u64,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create a game with fixed decks (front = first to draw).
    #[must_use]
    pub fn new(player_deck: Vec<Card>, cpu_deck: Vec<Card>, seed: u64) -> Self {
        let mut players = PlayerMap::new(|id| Player::new(id, Vec::new()));
        players[PlayerId::Player].deck = player_deck.into_iter().collect();
        players[PlayerId::Cpu].deck = cpu_deck.into_iter().collect();

        Self {
            players,
            turn: TurnState::default(),
            effects: EffectQueue::new(),
            animations: AnimationOrchestrator::new(),
            lock: TransitionLock::new(),
            continuation: ContinuationSlot::default(),
            collections: CollectionTracker::new(),
            data_grab: None,
            tantrum: None,
            open_what_you_want: None,
            win: None,
            epoch: 0,
            rng: GameRng::new(seed),
        }
    }

    /// Deal a standard game: build the recipe, shuffle, deal alternately.
    #[must_use]
    pub fn deal(config: &GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let cards = rng.shuffled(config.deck.build());

        let mut player_deck = Vec::with_capacity(cards.len() / 2 + 1);
        let mut cpu_deck = Vec::with_capacity(cards.len() / 2 + 1);
        for (i, card) in cards.into_iter().enumerate() {
            if i % 2 == 0 {
                player_deck.push(card);
            } else {
                cpu_deck.push(card);
            }
        }

        let mut state = Self::new(player_deck, cpu_deck, seed);
        state.rng = rng;
        state
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Cards on the board, both sides.
    #[must_use]
    pub fn board_card_count(&self) -> usize {
        self.players.iter().map(|(_, p)| p.board_len()).sum()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.win.is_some()
    }

    /// Every card id in the game, sorted: decks, boards, Launch-Stack
    /// piles and cards parked by a Data Grab.
    ///
    /// Its length and contents never change during a game.
    #[must_use]
    pub fn census(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .players
            .iter()
            .flat_map(|(_, p)| p.card_ids())
            .collect();
        if let Some(grab) = &self.data_grab {
            ids.extend(grab.card_ids());
        }
        ids.sort_unstable();
        ids
    }
}
