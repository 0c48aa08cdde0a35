//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Data War is strictly two-sided: the human `Player` and the `Cpu`.
//! Every API that needs "the other side" goes through `opponent()`.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    /// The human player.
    Player,
    /// The computer opponent.
    Cpu,
}

impl PlayerId {
    /// Both sides, player first. This is also the effect queueing order.
    pub const ALL: [PlayerId; 2] = [PlayerId::Player, PlayerId::Cpu];

    /// Get the raw index (player = 0, cpu = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::Player => 0,
            PlayerId::Cpu => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::Player => PlayerId::Cpu,
            PlayerId::Cpu => PlayerId::Player,
        }
    }

    /// Is this the computer side?
    #[must_use]
    pub const fn is_cpu(self) -> bool {
        matches!(self, PlayerId::Cpu)
    }

    /// Iterate over both sides, player first.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Player => write!(f, "player"),
            PlayerId::Cpu => write!(f, "cpu"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use data_war::core::{PlayerId, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::with_value(0);
/// wins[PlayerId::Cpu] += 1;
///
/// assert_eq!(wins[PlayerId::Player], 0);
/// assert_eq!(wins[PlayerId::Cpu], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::Player), factory(PlayerId::Cpu)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Borrow both entries mutably, `player`'s first.
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let (left, right) = self.data.split_at_mut(1);
        match player {
            PlayerId::Player => (&mut left[0], &mut right[0]),
            PlayerId::Cpu => (&mut right[0], &mut left[0]),
        }
    }

    /// Iterate over (PlayerId, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs, player first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
