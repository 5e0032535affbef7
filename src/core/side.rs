//! Sides and per-side data storage.
//!
//! ## Side
//!
//! The two symbols that take turns on the board. The player always plays
//! `X` and moves first in every fight; the enemy plays `O`.
//!
//! ## SideMap
//!
//! Per-side data storage backed by a fixed two-slot array, indexable
//! by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two symbols on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    X,
    O,
}

impl Side {
    /// The side controlled by the player.
    pub const PLAYER: Side = Side::X;

    /// The side controlled by the enemy AI.
    pub const ENEMY: Side = Side::O;

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Slot index (X = 0, O = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::X => 0,
            Side::O => 1,
        }
    }

    /// Both sides, player first.
    pub fn both() -> impl Iterator<Item = Side> {
        [Side::X, Side::O].into_iter()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::X => write!(f, "X"),
            Side::O => write!(f, "O"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use roguetac::core::{Side, SideMap};
///
/// let mut score: SideMap<u32> = SideMap::default();
/// score[Side::X] += 2;
/// assert_eq!(score[Side::X], 2);
/// assert_eq!(score[Side::O], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::X), factory(Side::O)],
        }
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::both().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_other() {
        assert_eq!(Side::X.other(), Side::O);
        assert_eq!(Side::O.other(), Side::X);
        assert_eq!(Side::PLAYER.other(), Side::ENEMY);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(format!("{}", Side::X), "X");
        assert_eq!(format!("{}", Side::O), "O");
    }

    #[test]
    fn test_side_map_new() {
        let map = SideMap::new(|s| s.index() * 10);
        assert_eq!(map[Side::X], 0);
        assert_eq!(map[Side::O], 10);
    }

    #[test]
    fn test_side_map_iter() {
        let map = SideMap::new(|s| s == Side::O);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::X, &false), (Side::O, &true)]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::new(|s| s.index() as u32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: SideMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
