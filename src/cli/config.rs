//! Shared configuration flags for CLI commands

use std::path::PathBuf;

use clap::Args;

use crate::{
    adapters::{FileStore, GameConfig, SnakeGame},
    app::{AgentConfig, App, BoardConfig, container::DEFAULT_STORE_DIR},
};

/// Agent, board and store settings common to every command
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Learning-rate constant (lr = lpc / (lpc + visits)); must be positive
    #[arg(long, default_value_t = AgentConfig::DEFAULT_LPC)]
    pub lpc: f64,

    /// Discount factor
    #[arg(long, default_value_t = AgentConfig::DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Board width and height in cells
    #[arg(long, default_value_t = 20)]
    pub board_size: i32,

    /// Random seed for reproducibility (the game uses seed + 1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding the saved model
    #[arg(long, default_value = DEFAULT_STORE_DIR)]
    pub store_dir: PathBuf,
}

impl AgentArgs {
    pub fn board(&self) -> BoardConfig {
        BoardConfig::square(self.board_size)
    }

    pub fn agent_config(&self) -> AgentConfig {
        let config = AgentConfig::default()
            .with_lpc(self.lpc)
            .with_gamma(self.gamma)
            .with_board(self.board());
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    pub fn game(&self) -> SnakeGame {
        SnakeGame::new(
            GameConfig::new(self.board()),
            self.seed.map(|seed| seed.wrapping_add(1)),
        )
    }

    pub fn app(&self) -> App {
        App::builder()
            .with_store(FileStore::new(&self.store_dir))
            .build()
    }
}
