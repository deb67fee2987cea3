//! Discretization of observations into bounded state indices.
//!
//! Six features are combined by mixed-radix encoding, most significant first:
//!
//! | feature | cardinality | weight |
//! |---|---|---|
//! | food dx sign | 3 | 144 |
//! | food dy sign | 3 | 48 |
//! | danger up | 2 | 24 |
//! | danger down | 2 | 12 |
//! | danger left | 2 | 6 |
//! | danger right | 2 | 3 |
//! | length category | 3 | 1 |

use crate::{
    Result,
    app::BoardConfig,
    types::{Action, NUM_ACTIONS, Observation, StateIndex},
};

/// Maps observations to [`StateIndex`] values for a fixed board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEncoder {
    board: BoardConfig,
}

impl StateEncoder {
    pub fn new(board: BoardConfig) -> Self {
        Self { board }
    }

    pub fn board(&self) -> BoardConfig {
        self.board
    }

    /// Encode an observation. Identical observations always map to the same index.
    pub fn encode(&self, observation: &Observation) -> Result<StateIndex> {
        let head = observation.head()?;
        let food_dx = (observation.food.x - head.x).signum();
        let food_dy = (observation.food.y - head.y).signum();

        let [up, down, left, right] = self.danger_flags(observation).map(usize::from);
        let length = length_category(observation.body.len());

        let raw = (food_dx + 1) as usize * 3 * 16 * 3
            + (food_dy + 1) as usize * 16 * 3
            + up * 8 * 3
            + down * 4 * 3
            + left * 2 * 3
            + right * 3
            + length;

        StateIndex::new(raw)
    }

    /// Whether moving the head one cell towards `action` leaves the board or
    /// lands on a body segment.
    ///
    /// The check runs against the current body, so the tail cell counts as
    /// occupied even though a non-eating move would vacate it.
    pub fn is_dangerous_move(&self, observation: &Observation, action: Action) -> bool {
        let Some(head) = observation.body.first() else {
            return false;
        };
        let next = head.moved(action);

        if next.x < 0 || next.x >= self.board.width || next.y < 0 || next.y >= self.board.height {
            return true;
        }

        observation.body.iter().skip(1).any(|segment| *segment == next)
    }

    /// Danger flags for every action, in [`Action::ALL`] order.
    pub fn danger_flags(&self, observation: &Observation) -> [bool; NUM_ACTIONS] {
        Action::ALL.map(|action| self.is_dangerous_move(observation, action))
    }
}

/// Bucket the snake length: short (<5), medium (<10) or long.
pub fn length_category(length: usize) -> usize {
    if length < 5 {
        0
    } else if length < 10 {
        1
    } else {
        2
    }
}
