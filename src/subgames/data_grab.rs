//! Data Grab: a timed free-for-all over every card on the board.
//!
//! ## Flow
//!
//! 1. `open` moves both boards into the pool, face state preserved.
//! 2. While the window is open, `grab` assigns pool cards to whoever taps
//!    them first.
//! 3. `close` settles: unclaimed cards go to the CPU, regular cards go
//!    straight into the collector's deck, face-up Launch Stacks are held
//!    for the board. The rest of the turn's effect queue is discarded
//!    except the Launch-Stack effects of held cards, which now belong to
//!    their collector.
//! 4. `restore` puts held Launch Stacks back on their collector's board
//!    (after the results modal has opened).
//!
//! A face-down Launch Stack is an ordinary card here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardId, PlayedCardState};
use crate::core::{Player, PlayerId, PlayerMap};
use crate::resolution::EffectQueue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataGrabStage {
    /// Window open; cards can be grabbed.
    Open,
    /// Window closed; results are showing.
    Results,
}

/// Per-side outcome, for the results modal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGrabResults {
    pub collected: PlayerMap<Vec<CardId>>,
    pub launch_stacks: PlayerMap<u32>,
    pub discarded_effects: usize,
}

/// The running sub-game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGrabState {
    pub stage: DataGrabStage,
    /// Cards up for grabs, player's board first.
    pub pool: Vec<PlayedCardState>,
    /// `(card, collector)` in grab order.
    pub grabs: Vec<(CardId, PlayerId)>,
    /// Face-up Launch Stacks waiting to return to the board.
    pub held: Vec<(PlayedCardState, PlayerId)>,
    pub results: Option<DataGrabResults>,
    pub restored: bool,
}

impl DataGrabState {
    /// Move both boards into the pool.
    pub fn open(players: &mut PlayerMap<Player>) -> Self {
        let pool = PlayerId::all()
            .flat_map(|side| players[side].take_board())
            .collect();
        Self {
            stage: DataGrabStage::Open,
            pool,
            grabs: Vec::new(),
            held: Vec::new(),
            results: None,
            restored: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stage == DataGrabStage::Open
    }

    /// Record a tap. Returns false (no-op) if the card isn't in the pool,
    /// was already grabbed, or the window has closed.
    pub fn grab(&mut self, player: PlayerId, card: CardId) -> bool {
        if !self.is_open() || !self.pool.iter().any(|p| p.id() == card) {
            return false;
        }
        if self.grabs.iter().any(|(id, _)| *id == card) {
            return false;
        }
        self.grabs.push((card, player));
        true
    }

    fn collector(&self, card: CardId) -> PlayerId {
        self.grabs
            .iter()
            .find(|(id, _)| *id == card)
            .map_or(PlayerId::Cpu, |(_, who)| *who)
    }

    /// Close the window and settle the pool.
    pub fn close(
        &mut self,
        players: &mut PlayerMap<Player>,
        effects: &mut EffectQueue,
    ) -> DataGrabResults {
        let mut results = DataGrabResults::default();
        if !self.is_open() {
            return self.results.clone().unwrap_or_default();
        }

        for played in std::mem::take(&mut self.pool) {
            let collector = self.collector(played.id());
            results.collected[collector].push(played.id());
            if played.is_counted_launch_stack() {
                results.launch_stacks[collector] += 1;
                self.held.push((played, collector));
            } else {
                players[collector].deck.push_back(played.card);
            }
        }

        let held = &self.held;
        results.discarded_effects =
            effects.retain_launch_stacks(|id| held.iter().any(|(p, _)| p.id() == id));
        for (played, collector) in &self.held {
            effects.override_destination(played.id(), *collector);
        }

        debug!(held = self.held.len(), discarded = results.discarded_effects, "data grab closed");
        self.stage = DataGrabStage::Results;
        self.results = Some(results.clone());
        results
    }

    /// Put held Launch Stacks back on the board. Runs once.
    pub fn restore(&mut self, players: &mut PlayerMap<Player>) -> usize {
        if self.stage != DataGrabStage::Results || self.restored {
            return 0;
        }
        for (played, collector) in &self.held {
            players[*collector].place(*played);
        }
        self.restored = true;
        self.held.len()
    }

    /// Cards this sub-game is holding outside every deck and board.
    pub fn card_ids(&self) -> Vec<CardId> {
        match self.stage {
            DataGrabStage::Open => self.pool.iter().map(PlayedCardState::id).collect(),
            DataGrabStage::Results if !self.restored => {
                self.held.iter().map(|(p, _)| p.id()).collect()
            }
            DataGrabStage::Results => Vec::new(),
        }
    }
}
