//! Objects on a grid and the resolution of their actions.
use crate::Level;
use anyhow::Result;
use gridcheck_core::{Location, StateHash};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xxhash_rust::xxh3::xxh3_64;

/// Kinds of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Controlled by a player.
    Avatar,

    /// Blocks everything.
    Wall,

    /// Pushed by the avatar.
    Box,

    /// Swallows boxes.
    Hole,
}

impl ObjectKind {
    /// All kinds in channel order of the observation.
    pub const ALL: [ObjectKind; 4] = [Self::Avatar, Self::Wall, Self::Box, Self::Hole];

    /// Channel of the kind in the observation.
    pub fn channel(&self) -> usize {
        match self {
            Self::Avatar => 0,
            Self::Wall => 1,
            Self::Box => 2,
            Self::Hole => 3,
        }
    }
}

/// An object placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Kind of the object.
    pub kind: ObjectKind,

    /// Owner of the object, 0 for neutral objects.
    pub player_id: u32,
}

/// Directions of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Decreasing x.
    Left,

    /// Decreasing y.
    Up,

    /// Increasing x.
    Right,

    /// Increasing y.
    Down,
}

impl Direction {
    /// All directions in the order of their action ids.
    pub const ALL: [Direction; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Returns the direction of an action id, `None` for the no-op and invalid ids.
    pub fn from_action_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Left),
            2 => Some(Self::Up),
            3 => Some(Self::Right),
            4 => Some(Self::Down),
            _ => None,
        }
    }

    /// Returns the action id of the direction.
    pub fn action_id(&self) -> u32 {
        match self {
            Self::Left => 1,
            Self::Up => 2,
            Self::Right => 3,
            Self::Down => 4,
        }
    }

    /// Returns the neighbour of `loc` in this direction.
    pub fn apply(&self, loc: Location) -> Location {
        match self {
            Self::Left => Location::new(loc.x - 1, loc.y),
            Self::Up => Location::new(loc.x, loc.y - 1),
            Self::Right => Location::new(loc.x + 1, loc.y),
            Self::Down => Location::new(loc.x, loc.y + 1),
        }
    }
}

/// A move of the object at `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Location of the moving object.
    pub source: Location,

    /// Direction of the move.
    pub direction: Direction,
}

impl Move {
    /// Constructs a move.
    pub fn new(source: Location, direction: Direction) -> Self {
        Self { source, direction }
    }

    /// Location the object moves to.
    pub fn destination(&self) -> Location {
        self.direction.apply(self.source)
    }

    /// Human readable description used in logs.
    pub fn description(&self) -> String {
        let dest = self.destination();
        format!(
            "Move [{}, {}]->[{}, {}]",
            self.source.x, self.source.y, dest.x, dest.y
        )
    }
}

/// A grid of objects. At most one object occupies a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tick: u64,
    objects: BTreeMap<Location, Object>,
    scores: BTreeMap<u32, i32>,
}

impl Grid {
    /// Creates a grid with the objects of a level.
    pub fn from_level(level: &Level) -> Self {
        debug!(
            "Setting grid dimensions to: [{}, {}]",
            level.width(),
            level.height()
        );
        let mut grid = Self {
            width: level.width(),
            height: level.height(),
            tick: 0,
            objects: BTreeMap::new(),
            scores: BTreeMap::new(),
        };
        for (loc, obj) in level.objects() {
            grid.init_object(*loc, *obj);
        }
        grid
    }

    /// Places an object. Occupied cells are left untouched.
    pub fn init_object(&mut self, loc: Location, obj: Object) -> bool {
        trace!("Adding object={:?} to location: {}", obj.kind, loc);
        if !self.in_bounds(loc) || self.objects.contains_key(&loc) {
            return false;
        }
        self.objects.insert(loc, obj);
        true
    }

    /// Width of the grid.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The number of ticks since the grid was created.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Advances the game clock.
    pub fn update(&mut self) {
        self.tick += 1;
    }

    /// Returns the object at `loc`.
    pub fn object(&self, loc: Location) -> Option<&Object> {
        self.objects.get(&loc)
    }

    /// Iterates over objects in location order.
    pub fn objects(&self) -> impl Iterator<Item = (&Location, &Object)> {
        self.objects.iter()
    }

    /// The number of objects of a kind.
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }

    /// Accumulated reward of a player.
    pub fn score(&self, player_id: u32) -> i32 {
        self.scores.get(&player_id).copied().unwrap_or(0)
    }

    /// Returns `true` if `loc` is inside the grid.
    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && (loc.x as u32) < self.width && (loc.y as u32) < self.height
    }

    /// Performs the moves of a player and returns the reward of each move.
    ///
    /// A move of an empty cell or of an object owned by another player gives
    /// no reward and has no effect. Only avatars move by themselves; boxes move
    /// when pushed into an empty cell and disappear when pushed into a hole.
    pub fn perform_actions(&mut self, player_id: u32, moves: &[Move]) -> Vec<i32> {
        trace!("Tick {}", self.tick);
        let mut rewards = Vec::with_capacity(moves.len());

        for mv in moves {
            debug!("Player={} performing action=({})", player_id, mv.description());

            let source = match self.objects.get(&mv.source) {
                Some(obj) => *obj,
                None => {
                    trace!("Cannot perform action on empty space.");
                    rewards.push(0);
                    continue;
                }
            };

            if source.player_id != 0 && source.player_id != player_id {
                trace!("Cannot perform action on objects not owned by player.");
                rewards.push(0);
                continue;
            }

            if source.kind != ObjectKind::Avatar {
                trace!("Action={} cannot be performed by {:?}", mv.description(), source.kind);
                rewards.push(0);
                continue;
            }

            let reward = self.move_avatar(mv);
            if reward != 0 {
                *self.scores.entry(player_id).or_insert(0) += reward;
            }
            rewards.push(reward);
        }

        rewards
    }

    fn move_avatar(&mut self, mv: &Move) -> i32 {
        let dest = mv.destination();
        if !self.in_bounds(dest) {
            return 0;
        }

        match self.objects.get(&dest).map(|o| o.kind) {
            None => {
                self.relocate(mv.source, dest);
                0
            }
            Some(ObjectKind::Box) => {
                let behind = mv.direction.apply(dest);
                if !self.in_bounds(behind) {
                    return 0;
                }
                match self.objects.get(&behind).map(|o| o.kind) {
                    None => {
                        self.relocate(dest, behind);
                        self.relocate(mv.source, dest);
                        0
                    }
                    Some(ObjectKind::Hole) => {
                        debug!("Box at {} fell into the hole at {}", dest, behind);
                        self.objects.remove(&dest);
                        self.relocate(mv.source, dest);
                        1
                    }
                    Some(_) => 0,
                }
            }
            Some(kind) => {
                trace!("Action={} blocked by {:?}", mv.description(), kind);
                0
            }
        }
    }

    fn relocate(&mut self, from: Location, to: Location) {
        if let Some(obj) = self.objects.remove(&from) {
            self.objects.insert(to, obj);
        }
    }

    /// Hash of the full state of the grid.
    ///
    /// The grid is encoded with bincode, which visits objects in location
    /// order, so equal grids always give equal hashes.
    pub fn state_hash(&self) -> Result<StateHash> {
        let bytes = bincode::serialize(self)?;
        Ok(StateHash(xxh3_64(&bytes)))
    }
}
