//! State introspection and action enumeration types.
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// Hash of the internal state of an environment.
///
/// The value is opaque; it is only compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateHash(pub u64);

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl From<u64> for StateHash {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A snapshot of the inspectable state of an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvState {
    /// The number of ticks since the last reset.
    pub game_ticks: u64,

    /// Hash of the internal state.
    pub hash: StateHash,
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Column.
    pub x: i32,

    /// Row.
    pub y: i32,
}

impl Location {
    /// Constructs a location.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Action names available at each location.
pub type AvailableActions = BTreeMap<Location, BTreeSet<String>>;

/// Action ids available for each action name.
pub type ActionIds = BTreeMap<String, Vec<u32>>;
