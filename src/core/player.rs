//! Player identification and per-player data storage.
//!
//! ## PlayerIndex
//!
//! Signed player index. Non-negative values address a seat in the game;
//! two negative sentinels stand for the admin (the engine itself, used for
//! fix-up moves) and for an observer with no seat.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerIndex`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Index of a player in a game.
///
/// Player indices are 0-based: the first seat is `PlayerIndex(0)`.
/// `ADMIN` and `OBSERVER` are never seats but are always valid proposers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerIndex(pub i32);

impl PlayerIndex {
    /// The engine itself. Equivalent to every seat.
    pub const ADMIN: PlayerIndex = PlayerIndex(-2);

    /// Someone watching the game. Equivalent to nobody.
    pub const OBSERVER: PlayerIndex = PlayerIndex(-1);

    /// Create a new player index.
    #[must_use]
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    /// The seat this index addresses, if it is not a sentinel.
    #[must_use]
    pub fn seat(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Whether this index is meaningful in a game with `player_count` players.
    ///
    /// The sentinels are always valid; seats must be in range.
    ///
    /// ```
    /// use rust_moves::core::PlayerIndex;
    ///
    /// assert!(PlayerIndex::new(2).is_valid(3));
    /// assert!(!PlayerIndex::new(3).is_valid(3));
    /// assert!(PlayerIndex::ADMIN.is_valid(3));
    /// assert!(!PlayerIndex::new(-7).is_valid(3));
    /// ```
    #[must_use]
    pub fn is_valid(self, player_count: usize) -> bool {
        if self == Self::ADMIN || self == Self::OBSERVER {
            return true;
        }
        matches!(self.seat(), Some(seat) if seat < player_count)
    }

    /// Whether this index stands for the same player as `other`.
    ///
    /// Observers are equivalent to nobody (not even another observer);
    /// the admin is equivalent to everybody else.
    #[must_use]
    pub fn equivalent(self, other: PlayerIndex) -> bool {
        if self == Self::OBSERVER || other == Self::OBSERVER {
            return false;
        }
        if self == Self::ADMIN || other == Self::ADMIN {
            return true;
        }
        self == other
    }

    /// The next seat in turn order, wrapping around.
    ///
    /// Sentinels have no next seat and are returned unchanged.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        match self.seat() {
            Some(seat) if player_count > 0 => Self(((seat + 1) % player_count) as i32),
            _ => self,
        }
    }

    /// The previous seat in turn order, wrapping around.
    #[must_use]
    pub fn previous(self, player_count: usize) -> Self {
        match self.seat() {
            Some(seat) if player_count > 0 => {
                Self(((seat + player_count - 1) % player_count) as i32)
            }
            _ => self,
        }
    }

    /// Iterate over all seats for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerIndex> {
        (0..player_count as i32).map(PlayerIndex)
    }
}

impl std::fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::ADMIN => write!(f, "Admin"),
            Self::OBSERVER => write!(f, "Observer"),
            PlayerIndex(i) => write!(f, "Player {}", i),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ## Example
///
/// ```
/// use rust_moves::core::{PlayerIndex, PlayerMap};
///
/// let mut score: PlayerMap<i32> = PlayerMap::new(vec![0, 0, 0]);
///
/// score[PlayerIndex::new(1)] = 15;
/// assert_eq!(score[PlayerIndex::new(1)], 15);
/// assert!(score.get(PlayerIndex::OBSERVER).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a PlayerMap from one entry per seat.
    pub fn new(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        Self { data }
    }

    /// Create a new PlayerMap with values from a factory function.
    pub fn from_fn(player_count: usize, factory: impl Fn(PlayerIndex) -> T) -> Self {
        Self::new(PlayerIndex::all(player_count).map(factory).collect())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's data, or `None` for sentinels and out-of-range seats.
    #[must_use]
    pub fn get(&self, player: PlayerIndex) -> Option<&T> {
        let seat = player.seat()?;
        self.data.get(seat)
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerIndex) -> Option<&mut T> {
        let seat = player.seat()?;
        self.data.get_mut(seat)
    }

    /// Iterate over (PlayerIndex, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerIndex(i as i32), v))
    }

    /// Iterate over (PlayerIndex, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerIndex, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerIndex(i as i32), v))
    }
}

impl<T> Index<PlayerIndex> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerIndex) -> &Self::Output {
        match self.get(player) {
            Some(value) => value,
            None => panic!("{} has no seat in this game", player),
        }
    }
}

impl<T> IndexMut<PlayerIndex> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerIndex) -> &mut Self::Output {
        match self.get_mut(player) {
            Some(value) => value,
            None => panic!("{} has no seat in this game", player),
        }
    }
}
