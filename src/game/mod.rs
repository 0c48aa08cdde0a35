//! The engine: a command dispatcher over `GameState` and a virtual clock.
//!
//! ## Driving the engine
//!
//! The outer UI state machine sends `Command`s to `Engine::dispatch` and
//! advances time with `Engine::advance` (or `run_until_idle` in tests).
//! Every call returns the `EngineEvent`s it produced.
//!
//! ```
//! use data_war::cards::{Card, CardId};
//! use data_war::core::{Command, GameConfig, PlayerId};
//! use data_war::game::Engine;
//!
//! let deck = |from: u32, value: u8| -> Vec<Card> {
//!     (from..from + 5).map(|i| Card::new(CardId::new(i), value)).collect()
//! };
//! let mut engine = Engine::with_decks(GameConfig::default(), deck(1, 5), deck(10, 3));
//!
//! engine.dispatch(Command::PlayCard(PlayerId::Player)).unwrap();
//! engine.dispatch(Command::PlayCard(PlayerId::Cpu)).unwrap();
//! engine.dispatch(Command::ResolveTurn).unwrap();
//! engine.run_until_idle();
//!
//! assert_eq!(engine.state().player(PlayerId::Player).deck.len(), 6);
//! assert!(!engine.transitions_blocked());
//! ```
//!
//! ## Turn flow
//!
//! `ResolveTurn` activates a Hostile Takeover if one is showing, refreshes
//! the turn values and runs the Data-War detector. A war sends the turn
//! back for war hands. Otherwise the turn is decided, every face-up
//! special is queued and the effect queue is pumped: one effect at a
//! time, pausing for animations, player choices, collections and the
//! Data Grab window. Once the queue drains, the board is collected, the
//! win conditions are checked and the next turn begins.
//!
//! ## Blocking
//!
//! Anything that waits holds a reason on the transition lock. Turn-
//! advancing commands are refused while the lock is held. When the last
//! reason is released the pending continuation (if any) runs.

mod collection;
mod events;
mod processor;
mod snapshot;
mod tasks;
mod turn;

use tracing::{debug, info, warn};

pub use events::{AudioTrack, ChoiceKind, EngineEvent};
pub use snapshot::GameSnapshot;

use crate::animation::{Continuation, LockReason};
use crate::cards::{Card, CardId};
use crate::core::{Command, EngineError, GameConfig, GameState, PlayerId};
use crate::rules::WinState;
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::zones::CollectionRequest;

/// Upper bound on timers fired by one `run_until_idle` call.
const MAX_TASKS_PER_RUN: usize = 100_000;

/// How a game is dealt. Kept so `ResetGame` can rebuild it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameSetup {
    /// Shuffle and deal the configured deck recipe.
    Standard { seed: u64 },
    /// Fixed decks, front first.
    Custom {
        player: Vec<Card>,
        cpu: Vec<Card>,
        seed: u64,
    },
}

impl GameSetup {
    #[must_use]
    pub fn seed(&self) -> u64 {
        match self {
            GameSetup::Standard { seed } | GameSetup::Custom { seed, .. } => *seed,
        }
    }

    fn build(&self, config: &GameConfig) -> GameState {
        match self {
            GameSetup::Standard { seed } => GameState::deal(config, *seed),
            GameSetup::Custom { player, cpu, seed } => {
                GameState::new(player.clone(), cpu.clone(), *seed)
            }
        }
    }
}

/// The Data War engine.
#[derive(Clone, Debug)]
pub struct Engine {
    config: GameConfig,
    state: GameState,
    scheduler: Scheduler,
    setup: GameSetup,
}

impl Engine {
    /// Deal a standard game.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::from_setup(config, GameSetup::Standard { seed })
    }

    /// Start from fixed decks (front = first to draw).
    #[must_use]
    pub fn with_decks(config: GameConfig, player: Vec<Card>, cpu: Vec<Card>) -> Self {
        Self::from_setup(config, GameSetup::Custom { player, cpu, seed: 0 })
    }

    #[must_use]
    pub fn from_setup(config: GameConfig, setup: GameSetup) -> Self {
        let state = setup.build(&config);
        Self {
            config,
            state,
            scheduler: Scheduler::new(),
            setup,
        }
    }

    // === Read access ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// When the next timer fires, if any is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Should the outer state machine hold off turn-advancing commands?
    #[must_use]
    pub fn transitions_blocked(&self) -> bool {
        self.state.lock.is_blocked()
    }

    #[must_use]
    pub fn lock_reasons(&self) -> Vec<LockReason> {
        self.state.lock.reasons()
    }

    #[must_use]
    pub fn winner(&self) -> Option<WinState> {
        self.state.win
    }

    /// Read-only view for the rendering layer.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, self.scheduler.now())
    }

    // === Commands ===

    /// Apply a command. A rejected command leaves the game untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<EngineEvent>, EngineError> {
        debug!(command = command.name(), turn = self.state.turn.number, "dispatch");
        let mut events = Vec::new();

        if !matches!(command, Command::StartGame { .. } | Command::ResetGame) {
            if self.state.is_over() {
                return Err(EngineError::GameOver);
            }
            if command.advances_turn() && self.state.lock.is_blocked() {
                return Err(EngineError::TransitionsBlocked(self.state.lock.reasons()));
            }
        }

        match command {
            Command::StartGame { seed } => {
                self.setup = GameSetup::Standard { seed };
                self.restart(&mut events);
            }
            Command::ResetGame => self.restart(&mut events),
            Command::PlayCard(side) => self.play_card(side, &mut events)?,
            Command::PlayWarHand(side) => self.play_war_hand(side, &mut events)?,
            Command::ResolveTurn => self.resolve_turn(&mut events)?,
            Command::ConfirmTemperTantrum { keep } => self.confirm_tantrum(&keep, &mut events)?,
            Command::ConfirmOpenWhatYouWant { order } => {
                self.confirm_open_what_you_want(&order, &mut events)?;
            }
            Command::GrabCard { player, card } => self.grab_card(player, card, &mut events)?,
            Command::DismissDataGrabResults => self.dismiss_results(&mut events),
        }

        Ok(events)
    }

    /// Start a collection directly. Cards already collected are skipped,
    /// so repeating a request moves each card once.
    pub fn collect_cards(&mut self, request: CollectionRequest) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.start_collection(request, &mut events);
        events
    }

    // === Time ===

    /// Advance the virtual clock, firing every timer that comes due.
    pub fn advance(&mut self, ms: u64) -> Vec<EngineEvent> {
        let target = self.scheduler.now().saturating_add(ms);
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.pop_due(target) {
            self.run_task(task, &mut events);
        }
        self.scheduler.advance_clock(target);
        events
    }

    /// Fire timers until none are left.
    ///
    /// Stops early (with a warning) if timers keep rescheduling each other.
    pub fn run_until_idle(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(u64::MAX) {
            fired += 1;
            if fired > MAX_TASKS_PER_RUN {
                warn!(fired, "scheduler did not go idle");
                break;
            }
            self.run_task(task, &mut events);
        }
        events
    }

    // === Internals shared by the submodules ===

    fn restart(&mut self, events: &mut Vec<EngineEvent>) {
        let epoch = self.state.epoch + 1;
        self.state = self.setup.build(&self.config);
        self.state.epoch = epoch;
        info!(seed = self.setup.seed(), epoch, "game started");
        events.push(EngineEvent::GameStarted {
            seed: self.setup.seed(),
        });
    }

    fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.scheduler.schedule(delay_ms, self.state.epoch, task)
    }

    /// Put `next` in the continuation slot.
    fn register(&mut self, next: Continuation) {
        if let Err(held) = self.state.continuation.register(next) {
            warn!(?held, ?next, "continuation already pending, keeping the first");
        }
    }

    /// Drop a lock reason, then resume if that cleared the lock.
    fn release(&mut self, reason: LockReason, events: &mut Vec<EngineEvent>) {
        if self.state.lock.release(reason) && !self.state.lock.is_blocked() {
            events.push(EngineEvent::TransitionsUnblocked);
        }
        self.try_resume(events);
    }

    /// Run the pending continuation once nothing blocks anymore.
    fn try_resume(&mut self, events: &mut Vec<EngineEvent>) {
        if self.state.lock.is_blocked() || self.state.animations.is_playing() {
            return;
        }
        let Some(next) = self.state.continuation.take() else {
            return;
        };
        debug!(?next, "resuming");
        match next {
            Continuation::ApplyEffect => {
                if self.apply_in_flight(events) {
                    self.pump(events);
                }
            }
            Continuation::ResumeEffectQueue => self.pump(events),
        }
    }

    fn grab_card(
        &mut self,
        player: PlayerId,
        card: CardId,
        events: &mut Vec<EngineEvent>,
    ) -> Result<(), EngineError> {
        let Some(grab) = self.state.data_grab.as_mut().filter(|g| g.is_open()) else {
            return Err(EngineError::NoChoiceOpen("data grab"));
        };
        if grab.grab(player, card) {
            events.push(EngineEvent::CardGrabbed { player, card });
        } else {
            debug!(%player, %card, "grab ignored");
        }
        Ok(())
    }

    fn dismiss_results(&mut self, events: &mut Vec<EngineEvent>) {
        if self.state.lock.holds(LockReason::ResultsModal) {
            self.release(LockReason::ResultsModal, events);
        } else {
            debug!("results modal already closed");
        }
    }
}
