//! Card definitions - immutable card identity.
//!
//! A `Card` is an identity (`CardId`), a `SpecialType` and a base value.
//! Cards never change once dealt; everything that varies during a turn
//! (face orientation, owner, pile membership) lives outside the card.

use serde::{Deserialize, Serialize};

/// Unique identifier for a single physical card in a game.
///
/// Ids are unique across both decks, so the multiset of ids is the
/// conservation invariant the whole engine protects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Special behavior carried by a card.
///
/// The serialized names match the action identifiers the card art and
/// tooltips are keyed by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialType {
    /// Plain value card.
    #[default]
    None,
    /// Adds its value to its owner's turn value.
    Tracker,
    /// Subtracts its value from the opponent's turn value.
    Blocker,
    /// Non-value card; collecting enough of them wins the game.
    LaunchStack,
    /// Forces a Data-War-like round at a fixed value.
    HostileTakeover,
    /// Steals a Launch Stack from the opponent.
    #[serde(rename = "move_theft")]
    PatentTheft,
    /// Buys the top of the opponent's deck.
    #[serde(rename = "move_buyout")]
    LeveragedBuyout,
    /// The winner keeps only a couple of their own cards.
    #[serde(rename = "move_tantrum")]
    TemperTantrum,
    /// Sends the opponent's Launch Stacks back into their deck.
    #[serde(rename = "firewall_recall")]
    MandatoryRecall,
    /// Swaps both decks.
    ForcedEmpathy,
    /// Peek at and reorder the top of your own deck.
    OpenWhatYouWant,
    /// Free-for-all board collection mini-game.
    DataGrab,
}

impl SpecialType {
    /// Every special type, in declaration order.
    pub const ALL: [SpecialType; 12] = [
        SpecialType::None,
        SpecialType::Tracker,
        SpecialType::Blocker,
        SpecialType::LaunchStack,
        SpecialType::HostileTakeover,
        SpecialType::PatentTheft,
        SpecialType::LeveragedBuyout,
        SpecialType::TemperTantrum,
        SpecialType::MandatoryRecall,
        SpecialType::ForcedEmpathy,
        SpecialType::OpenWhatYouWant,
        SpecialType::DataGrab,
    ];

    /// Does this card carry a special effect at all?
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, SpecialType::None)
    }

    /// Modifier cards don't settle a turn on their own: the same side
    /// must play another card on top of them.
    #[must_use]
    pub const fn requires_follow_up(self) -> bool {
        matches!(
            self,
            SpecialType::Tracker | SpecialType::Blocker | SpecialType::LaunchStack
        )
    }

    /// Identifier used by card art, audio and tooltips.
    #[must_use]
    pub const fn action_id(self) -> &'static str {
        match self {
            SpecialType::None => "none",
            SpecialType::Tracker => "tracker",
            SpecialType::Blocker => "blocker",
            SpecialType::LaunchStack => "launch_stack",
            SpecialType::HostileTakeover => "hostile_takeover",
            SpecialType::PatentTheft => "move_theft",
            SpecialType::LeveragedBuyout => "move_buyout",
            SpecialType::TemperTantrum => "move_tantrum",
            SpecialType::MandatoryRecall => "firewall_recall",
            SpecialType::ForcedEmpathy => "forced_empathy",
            SpecialType::OpenWhatYouWant => "open_what_you_want",
            SpecialType::DataGrab => "data_grab",
        }
    }
}

impl std::fmt::Display for SpecialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.action_id())
    }
}

/// An immutable card.
///
/// ## Example
///
/// ```
/// use data_war::cards::{Card, CardId, SpecialType};
///
/// let tracker = Card::special(CardId::new(7), SpecialType::Tracker, 2);
/// assert!(tracker.requires_follow_up());
/// assert_eq!(tracker.value, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity.
    pub id: CardId,

    /// Special behavior, if any.
    #[serde(rename = "specialType")]
    pub special: SpecialType,

    /// Base value. For trackers and blockers this is the modifier amount.
    pub value: u8,
}

impl Card {
    /// Create a plain value card.
    #[must_use]
    pub const fn new(id: CardId, value: u8) -> Self {
        Self {
            id,
            special: SpecialType::None,
            value,
        }
    }

    /// Create a special card.
    #[must_use]
    pub const fn special(id: CardId, special: SpecialType, value: u8) -> Self {
        Self { id, special, value }
    }

    /// See [`SpecialType::requires_follow_up`].
    #[must_use]
    pub const fn requires_follow_up(&self) -> bool {
        self.special.requires_follow_up()
    }

    /// A value-0 blocker cancels the opponent's trackers and Hostile Takeover.
    #[must_use]
    pub const fn is_tracker_smacker(&self) -> bool {
        matches!(self.special, SpecialType::Blocker) && self.value == 0
    }

    #[must_use]
    pub const fn is_launch_stack(&self) -> bool {
        matches!(self.special, SpecialType::LaunchStack)
    }

    #[must_use]
    pub const fn is_hostile_takeover(&self) -> bool {
        matches!(self.special, SpecialType::HostileTakeover)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.special {
            SpecialType::None => write!(f, "{}[{}]", self.id, self.value),
            special => write!(f, "{}[{} {}]", self.id, special, self.value),
        }
    }
}
