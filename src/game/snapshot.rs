//! Read-only view of a game for the rendering layer.
//!
//! A `GameSnapshot` is a plain serde value: the UI can ship it as JSON, and
//! tests and replays store it compactly with bincode.

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationKind, LockReason};
use crate::core::{GameState, Player, PlayerMap, SnapshotError, TurnState};
use crate::effects::PendingEffect;
use crate::rules::WinState;
use crate::subgames::{DataGrabState, OpenWhatYouWantState, TemperTantrumState};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Virtual time of the capture, in ms.
    pub now: u64,
    pub turn: TurnState,
    pub players: PlayerMap<Player>,
    pub lock: Vec<LockReason>,
    pub transitions_blocked: bool,
    pub showing: Option<AnimationKind>,
    pub queued_animations: usize,
    /// The effect being applied, then the queue in order.
    pub pending_effects: Vec<PendingEffect>,
    pub data_grab: Option<DataGrabState>,
    pub tantrum: Option<TemperTantrumState>,
    pub open_what_you_want: Option<OpenWhatYouWantState>,
    pub win: Option<WinState>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(state: &GameState, now: u64) -> Self {
        let pending_effects = state
            .effects
            .in_flight()
            .into_iter()
            .chain(state.effects.pending())
            .copied()
            .collect();

        Self {
            now,
            turn: state.turn.clone(),
            players: state.players.clone(),
            lock: state.lock.reasons(),
            transitions_blocked: state.lock.is_blocked(),
            showing: state.animations.showing(),
            queued_animations: state.animations.queued(),
            pending_effects,
            data_grab: state.data_grab.clone(),
            tantrum: state.tantrum.clone(),
            open_what_you_want: state.open_what_you_want.clone(),
            win: state.win,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
