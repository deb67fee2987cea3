//! Core domain types shared by the agent, the environment and persistence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of discrete actions available to the agent.
pub const NUM_ACTIONS: usize = 4;

/// Number of distinct state indices produced by the encoder.
///
/// foodDx(3) × foodDy(3) × four danger flags (2 each) × length category(3).
pub const STATE_SPACE_SIZE: usize = 3 * 3 * 2 * 2 * 2 * 2 * 3;

/// Heading requested by the agent.
///
/// The declaration order is significant: value vectors are indexed
/// positionally by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in value-vector order.
    pub const ALL: [Action; NUM_ACTIONS] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Position of this action in [`Action::ALL`].
    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Action stored at `index` in [`Action::ALL`].
    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }

    /// Grid delta `(dx, dy)`; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }

    /// Returns true if `other` points the opposite way.
    pub fn is_opposite(self, other: Action) -> bool {
        matches!(
            (self, other),
            (Action::Up, Action::Down)
                | (Action::Down, Action::Up)
                | (Action::Left, Action::Right)
                | (Action::Right, Action::Left)
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
        };
        f.pad(name)
    }
}

/// A cell on the board, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in the direction of `action`.
    pub fn moved(self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snapshot of the environment handed to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Body segments, head first
    pub body: Vec<Position>,
    /// Food location
    pub food: Position,
    /// Cumulative score of the current episode
    pub score: u32,
    /// Whether the episode has ended
    pub terminal: bool,
}

impl Observation {
    /// Head of the snake.
    pub fn head(&self) -> Result<Position> {
        self.body.first().copied().ok_or(Error::EmptyBody)
    }
}

/// Bounded index into the value table.
///
/// Can only be built through [`StateIndex::new`], so every value held by a
/// `StateIndex` lies in `0..STATE_SPACE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateIndex(usize);

impl StateIndex {
    pub fn new(raw: usize) -> Result<Self> {
        if raw >= STATE_SPACE_SIZE {
            return Err(Error::StateOutOfRange {
                index: raw,
                size: STATE_SPACE_SIZE,
            });
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Iterate every valid state index in ascending order.
    pub fn all() -> impl Iterator<Item = StateIndex> {
        (0..STATE_SPACE_SIZE).map(StateIndex)
    }
}

impl TryFrom<usize> for StateIndex {
    type Error = Error;

    fn try_from(raw: usize) -> Result<Self> {
        StateIndex::new(raw)
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
