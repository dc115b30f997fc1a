//! Player seats and per-player storage.
//!
//! ## PlayerId
//!
//! Seats are 0-based internally and shown 1-based ("Player 1") everywhere a
//! human reads them. Turn order is seat order.
//!
//! ## PlayerMap
//!
//! One slot per seat, backed by a `Vec` for O(1) indexing by `PlayerId`.
//! The ownership table is a `PlayerMap<Option<GiftId>>`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Largest table the engine accepts.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// A seat at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based seat number as printed in logs.
    #[must_use]
    pub const fn number(self) -> usize {
        self.0 as usize + 1
    }

    /// All seats of a table of `player_count`, in turn order.
    ///
    /// ```
    /// use white_elephant::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_PLAYERS) as u8).map(PlayerId)
    }

    /// Short label used in chart axes ("P1").
    #[must_use]
    pub fn short_label(self) -> String {
        format!("P{}", self.number())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Error returned when a "Player N" label cannot be read back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("not a player label: {0:?}")]
pub struct ParsePlayerError(pub String);

impl FromStr for PlayerId {
    type Err = ParsePlayerError;

    /// Parses the display form, `Player 3` → `PlayerId(2)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .trim()
            .strip_prefix("Player ")
            .and_then(|n| n.trim().parse::<usize>().ok())
            .filter(|n| (1..=MAX_PLAYERS).contains(n))
            .ok_or_else(|| ParsePlayerError(s.to_string()))?;
        Ok(PlayerId((number - 1) as u8))
    }
}

/// Per-seat storage with O(1) access.
///
/// ```
/// use white_elephant::core::{PlayerId, PlayerMap};
///
/// let mut holdings: PlayerMap<Option<u32>> = PlayerMap::with_default(3);
/// holdings[PlayerId::new(1)] = Some(7);
/// assert_eq!(holdings[PlayerId::new(1)], Some(7));
/// assert_eq!(holdings[PlayerId::new(0)], None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map with one value per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Whether `player` is a seat of this table.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over (seat, value) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display_is_one_based() {
        assert_eq!(PlayerId::new(0).to_string(), "Player 1");
        assert_eq!(PlayerId::new(7).to_string(), "Player 8");
        assert_eq!(PlayerId::new(2).short_label(), "P3");
    }

    #[test]
    fn test_player_id_parse() {
        assert_eq!("Player 1".parse::<PlayerId>(), Ok(PlayerId::new(0)));
        assert_eq!(" Player 12 ".parse::<PlayerId>(), Ok(PlayerId::new(11)));
        assert!("Player 0".parse::<PlayerId>().is_err());
        assert!("P1".parse::<PlayerId>().is_err());
        assert!("Player x".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_player_id_all_in_turn_order() {
        let seats: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(seats.len(), 4);
        assert!(seats.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_player_map_factory() {
        let map: PlayerMap<usize> = PlayerMap::new(3, |p| p.number() * 10);

        assert_eq!(map[PlayerId::new(0)], 10);
        assert_eq!(map[PlayerId::new(2)], 30);
        assert_eq!(map.player_count(), 3);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<Option<u32>> = PlayerMap::with_default(2);
        map[PlayerId::new(1)] = Some(4);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &None), (PlayerId::new(1), &Some(4))]);
        assert!(map.contains(PlayerId::new(1)));
        assert!(!map.contains(PlayerId::new(2)));
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<Option<u32>> = PlayerMap::new(2, |p| Some(p.index() as u32));
        let json = serde_json::to_string(&map).unwrap();
        let restored: PlayerMap<Option<u32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, restored);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u8> = PlayerMap::with_value(0, 0);
    }
}
