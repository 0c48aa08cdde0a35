//! Engine events: what the rendering and audio layers are told.
//!
//! Every `dispatch`, `advance` and `run_until_idle` call returns the
//! events it produced, in order. Audio requests are fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationKind;
use crate::cards::{Card, CardId};
use crate::core::PlayerId;
use crate::rules::{TurnOutcome, WinState};
use crate::subgames::DataGrabResults;
use crate::zones::CollectionId;

/// Named audio tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioTrack {
    CardFlip,
    DataWar,
    HostileTakeover,
    PatentTheft,
    LeveragedBuyout,
    TemperTantrum,
    MandatoryRecall,
    ForcedEmpathy,
    DataGrab,
    LaunchStackRocket,
    Victory,
    Defeat,
}

impl AudioTrack {
    /// Track identifier the audio layer is keyed by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AudioTrack::CardFlip => "card_flip",
            AudioTrack::DataWar => "data_war",
            AudioTrack::HostileTakeover => "hostile_takeover",
            AudioTrack::PatentTheft => "move_theft",
            AudioTrack::LeveragedBuyout => "move_buyout",
            AudioTrack::TemperTantrum => "move_tantrum",
            AudioTrack::MandatoryRecall => "firewall_recall",
            AudioTrack::ForcedEmpathy => "forced_empathy",
            AudioTrack::DataGrab => "data_grab",
            AudioTrack::LaunchStackRocket => "launch_stack_rocket",
            AudioTrack::Victory => "victory",
            AudioTrack::Defeat => "defeat",
        }
    }

    /// Track that accompanies an animation.
    #[must_use]
    pub const fn for_animation(kind: AnimationKind) -> Self {
        match kind {
            AnimationKind::DataWar => AudioTrack::DataWar,
            AnimationKind::HostileTakeover => AudioTrack::HostileTakeover,
            AnimationKind::PatentTheft => AudioTrack::PatentTheft,
            AnimationKind::LeveragedBuyout => AudioTrack::LeveragedBuyout,
            AnimationKind::TemperTantrum => AudioTrack::TemperTantrum,
            AnimationKind::MandatoryRecall => AudioTrack::MandatoryRecall,
            AnimationKind::ForcedEmpathy => AudioTrack::ForcedEmpathy,
        }
    }
}

/// Which choice is waiting on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    TemperTantrum,
    OpenWhatYouWant,
}

/// Something that happened inside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    GameStarted {
        seed: u64,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
        face_down: bool,
    },
    TurnResolved {
        outcome: TurnOutcome,
        player_value: i32,
        cpu_value: i32,
    },
    DataWarStarted {
        stage: u32,
        hostile_takeover: bool,
    },
    AnimationStarted {
        kind: AnimationKind,
        played_by: PlayerId,
    },
    AnimationFinished {
        kind: AnimationKind,
    },
    Audio(AudioTrack),
    ChoiceOpened {
        choice: ChoiceKind,
        player: PlayerId,
    },
    ChoiceConfirmed {
        choice: ChoiceKind,
        player: PlayerId,
    },
    LaunchStackStolen {
        from: PlayerId,
        to: PlayerId,
    },
    LaunchStacksRecalled {
        player: PlayerId,
        count: usize,
    },
    DecksSwapped,
    DataGrabStarted {
        pool: usize,
    },
    CardGrabbed {
        player: PlayerId,
        card: CardId,
    },
    DataGrabFinished {
        results: DataGrabResults,
    },
    DataGrabBoardRestored {
        launch_stacks: usize,
    },
    CollectionStarted {
        id: CollectionId,
        cards: usize,
        launch_stacks: u32,
        duration_ms: u64,
    },
    CollectionFinished {
        id: CollectionId,
        collected: Vec<CardId>,
    },
    TurnEnded {
        turn: u32,
    },
    TransitionsUnblocked,
    GameOver(WinState),
}
