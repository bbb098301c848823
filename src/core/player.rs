//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index assigned in join order. The first player to join is
//! `PlayerId(0)`.
//!
//! ## PlayerMap
//!
//! Per-seat data backed by a `Vec` for O(1) access. Used for results the
//! engine hands back to collaborators (grid options, final scores).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat index of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use rust_dicedraft::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Seat order for one round: forward from `first`, then backward.
    ///
    /// Every player appears exactly twice; the player who drafts first
    /// also drafts last.
    ///
    /// ```
    /// use rust_dicedraft::core::PlayerId;
    ///
    /// let order = PlayerId::draft_order(3, PlayerId(1));
    /// let seats: Vec<u8> = order.iter().map(|p| p.0).collect();
    /// assert_eq!(seats, vec![1, 2, 0, 0, 2, 1]);
    /// ```
    #[must_use]
    pub fn draft_order(player_count: usize, first: PlayerId) -> Vec<PlayerId> {
        let forward: Vec<PlayerId> = (0..player_count)
            .map(|offset| PlayerId(((first.index() + offset) % player_count) as u8))
            .collect();

        forward
            .iter()
            .copied()
            .chain(forward.iter().rev().copied())
            .collect()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_dicedraft::core::{PlayerId, PlayerMap};
///
/// let mut tokens: PlayerMap<u32> = PlayerMap::new(2, |_| 3);
/// tokens[PlayerId::new(1)] -= 1;
/// assert_eq!(tokens[PlayerId::new(0)], 3);
/// assert_eq!(tokens[PlayerId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Build a map from values already in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's entry, or `None` for a seat outside the map.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Transform every entry, keeping seat order.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.iter().map(|(p, v)| f(p, v)).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_draft_order_two_players() {
        let order = PlayerId::draft_order(2, PlayerId(0));
        assert_eq!(order, vec![PlayerId(0), PlayerId(1), PlayerId(1), PlayerId(0)]);
    }

    #[test]
    fn test_draft_order_each_player_twice() {
        for count in 1..=4 {
            for first in PlayerId::all(count) {
                let order = PlayerId::draft_order(count, first);
                assert_eq!(order.len(), count * 2);
                assert_eq!(order[0], first);
                assert_eq!(order[order.len() - 1], first);
                for p in PlayerId::all(count) {
                    assert_eq!(order.iter().filter(|&&o| o == p).count(), 2);
                }
            }
        }
    }

    #[test]
    fn test_player_map_get_out_of_range() {
        let map: PlayerMap<i32> = PlayerMap::with_value(2, 7);
        assert_eq!(map.get(PlayerId(1)), Some(&7));
        assert_eq!(map.get(PlayerId(2)), None);
    }

    #[test]
    fn test_player_map_map() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32);
        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[PlayerId(2)], 4);
        assert_eq!(doubled.player_count(), 3);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::from_vec(vec![1, 2]);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
