//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Council games run 2-8 players but the type
//! itself supports up to 255; the config asserts the real bound.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, used throughout the
//! snapshot for victory points, completed objectives, and secret hands.
//! `map_player` produces a copy with one entry transformed, which is how the
//! immutable snapshot builds its successors without touching the original.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use star_council::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(6).collect();
    /// assert_eq!(players.len(), 6);
    /// assert_eq!(players[5], PlayerId::new(5));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ## Example
///
/// ```
/// use star_council::core::{PlayerId, PlayerMap};
///
/// // Everyone starts at zero victory points.
/// let points: PlayerMap<u8> = PlayerMap::with_value(4, 0);
/// assert_eq!(points[PlayerId::new(2)], 0);
///
/// // Pure update: the original map is untouched.
/// let after = points.map_player(PlayerId::new(2), |p| p + 2);
/// assert_eq!(points[PlayerId::new(2)], 0);
/// assert_eq!(after[PlayerId::new(2)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Build a copy with one player's entry transformed.
    ///
    /// Entries for other players are cloned as-is; with `im` containers
    /// inside, those clones are O(1) structural shares.
    #[must_use]
    pub fn map_player(&self, player: PlayerId, f: impl Fn(&T) -> T) -> Self
    where
        T: Clone,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == player.index() {
                    f(v)
                } else {
                    v.clone()
                }
            })
            .collect();
        Self { data }
    }

    /// Build a copy with every player's entry transformed.
    #[must_use]
    pub fn map_all(&self, f: impl Fn(PlayerId, &T) -> T) -> Self {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| f(PlayerId(i as u8), v))
            .collect();
        Self { data }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p3 = PlayerId::new(3);

        assert_eq!(p0.index(), 0);
        assert_eq!(p3.index(), 3);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_ordering() {
        // Tied-player queries sort their results; Ord must follow index.
        let mut ids = vec![PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<u8> = PlayerMap::new(4, |p| p.index() as u8 * 2);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 6);
    }

    #[test]
    fn test_player_map_with_value() {
        let map: PlayerMap<u8> = PlayerMap::with_value(3, 10);
        for (_, points) in map.iter() {
            assert_eq!(*points, 10);
        }
    }

    #[test]
    fn test_map_player_leaves_original_untouched() {
        let points: PlayerMap<u8> = PlayerMap::with_value(3, 0);
        let after = points.map_player(PlayerId::new(1), |p| p + 4);

        assert_eq!(points[PlayerId::new(1)], 0);
        assert_eq!(after[PlayerId::new(1)], 4);
        assert_eq!(after[PlayerId::new(0)], 0);
        assert_eq!(after[PlayerId::new(2)], 0);
    }

    #[test]
    fn test_map_player_chains() {
        let bonus = 3;
        let points: PlayerMap<u8> = PlayerMap::with_value(3, 1);
        let after = points
            .map_player(PlayerId::new(2), |p| p + bonus)
            .map_player(PlayerId::new(2), |p| p * 2);

        assert_eq!(after[PlayerId::new(2)], 8);
        assert_eq!(after[PlayerId::new(0)], 1);
        assert_eq!(points[PlayerId::new(2)], 1);
    }

    #[test]
    fn test_map_all() {
        let map: PlayerMap<u8> = PlayerMap::with_value(3, 5);
        let reset = map.map_all(|_, _| 0);

        for (_, v) in reset.iter() {
            assert_eq!(*v, 0);
        }
        assert_eq!(map[PlayerId::new(0)], 5);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<u8> = PlayerMap::new(3, |p| p.index() as u8);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], (PlayerId::new(0), &0));
        assert_eq!(pairs[2], (PlayerId::new(2), &2));
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<u8> = PlayerMap::new(2, |p| p.index() as u8 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u8> = PlayerMap::with_value(0, 0);
    }
}
