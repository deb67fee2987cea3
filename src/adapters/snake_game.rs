//! Reference Snake simulator implementing the [`Environment`] port.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    app::BoardConfig,
    ports::Environment,
    types::{Action, Observation, Position},
};

/// Simulator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// Segments at reset, laid out behind the head
    pub initial_length: usize,
    /// Steps allowed without eating, as a multiple of the board's cell count
    pub step_budget_factor: usize,
}

impl GameConfig {
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    /// Steps without food after which the episode is forced to end.
    pub fn max_steps(&self) -> usize {
        self.step_budget_factor * self.board.cells()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            initial_length: 1,
            step_budget_factor: 8,
        }
    }
}

/// Snake game on a bounded grid.
///
/// The snake starts at the centre of the board heading right. Running into a
/// wall or any current body segment ends the episode, as does exceeding the
/// step budget without eating or filling the whole board.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    config: GameConfig,
    /// Head first
    body: Vec<Position>,
    heading: Action,
    food: Position,
    score: u32,
    steps: usize,
    terminal: bool,
    rng: StdRng,
}

impl SnakeGame {
    /// Create a game; pass a seed for reproducible food placement.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut game = Self {
            config,
            body: Vec::new(),
            heading: Action::Right,
            food: Position::new(0, 0),
            score: 0,
            steps: 0,
            terminal: false,
            rng,
        };
        game.restart();
        game
    }

    /// Default 20x20 game with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default(), Some(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn heading(&self) -> Action {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.terminal
    }

    /// Move the food to `position`.
    pub fn place_food(&mut self, position: Position) {
        self.food = position;
    }

    fn restart(&mut self) {
        let board = self.config.board;
        let head = Position::new(board.width / 2, board.height / 2);
        let length = self.config.initial_length.max(1);
        self.body = (0..length as i32)
            .map(|i| Position::new(head.x - i, head.y))
            .filter(|p| p.x >= 0)
            .collect();
        self.heading = Action::Right;
        self.score = 0;
        self.steps = 0;
        self.terminal = false;
        match self.spawn_food() {
            Some(food) => self.food = food,
            None => self.terminal = true,
        }
    }

    fn in_bounds(&self, position: Position) -> bool {
        let board = self.config.board;
        position.x >= 0 && position.x < board.width && position.y >= 0 && position.y < board.height
    }

    /// Uniformly random free cell, or `None` if the snake fills the board.
    fn spawn_food(&mut self) -> Option<Position> {
        let board = self.config.board;
        let free: Vec<Position> = (0..board.height)
            .flat_map(|y| (0..board.width).map(move |x| Position::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

impl Environment for SnakeGame {
    fn reset(&mut self) -> Result<()> {
        self.restart();
        Ok(())
    }

    fn observe(&self) -> Observation {
        Observation {
            body: self.body.clone(),
            food: self.food,
            score: self.score,
            terminal: self.terminal,
        }
    }

    fn act(&mut self, action: Action) {
        if !self.heading.is_opposite(action) {
            self.heading = action;
        }
    }

    fn step(&mut self) -> Result<()> {
        if self.terminal {
            return Ok(());
        }
        self.steps += 1;

        let head = self.body[0].moved(self.heading);
        if !self.in_bounds(head) || self.body.contains(&head) {
            self.terminal = true;
            return Ok(());
        }

        self.body.insert(0, head);
        if head == self.food {
            self.score += 1;
            self.steps = 0;
            match self.spawn_food() {
                Some(food) => self.food = food,
                None => self.terminal = true,
            }
        } else {
            self.body.pop();
        }

        if self.steps > self.config.max_steps() {
            self.terminal = true;
        }
        Ok(())
    }
}
