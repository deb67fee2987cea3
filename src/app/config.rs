//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Board dimensions, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
}

impl BoardConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Square board with `size` cells per side.
    pub fn square(size: i32) -> Self {
        Self::new(size, size)
    }

    /// Total number of cells on the board.
    pub fn cells(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(Error::invalid_config(format!(
                "board must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::square(20)
    }
}

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use snake_qlearn::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_lpc(40.0)
///     .with_gamma(0.7)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning-rate constant in `lr = lpc / (lpc + visits)`; must be positive
    pub lpc: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Multiplicative epsilon decay applied once per episode
    pub epsilon_decay: f64,
    /// Floor for epsilon
    pub epsilon_min: f64,
    /// Board the encoder checks bounds against
    pub board: BoardConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_LPC: f64 = 40.0;
    pub const DEFAULT_GAMMA: f64 = 0.7;

    pub fn with_lpc(mut self, lpc: f64) -> Self {
        self.lpc = lpc;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon_schedule(mut self, start: f64, decay: f64, min: f64) -> Self {
        self.epsilon = start;
        self.epsilon_decay = decay;
        self.epsilon_min = min;
        self
    }

    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values that would corrupt the learning-rate or exploration schedule.
    pub fn validate(&self) -> Result<()> {
        if !self.lpc.is_finite() || self.lpc <= 0.0 {
            return Err(Error::invalid_config(format!(
                "lpc must be a positive finite number, got {}",
                self.lpc
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::invalid_config(format!(
                "gamma must lie in [0, 1], got {}",
                self.gamma
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid_config(format!(
                "epsilon must lie in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon_min) {
            return Err(Error::invalid_config(format!(
                "epsilon_min must lie in [0, 1], got {}",
                self.epsilon_min
            )));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::invalid_config(format!(
                "epsilon_decay must lie in (0, 1], got {}",
                self.epsilon_decay
            )));
        }
        self.board.validate()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            lpc: Self::DEFAULT_LPC,
            gamma: Self::DEFAULT_GAMMA,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            epsilon_min: 0.01,
            board: BoardConfig::default(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AgentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_lpc_rejected() {
        for lpc in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = AgentConfig::default().with_lpc(lpc);
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration { .. })),
                "lpc {lpc} should be rejected"
            );
        }
    }

    #[test]
    fn test_out_of_range_schedule_rejected() {
        assert!(AgentConfig::default().with_gamma(1.5).validate().is_err());
        assert!(
            AgentConfig::default()
                .with_epsilon_schedule(1.0, 0.0, 0.01)
                .validate()
                .is_err()
        );
        assert!(
            AgentConfig::default()
                .with_epsilon_schedule(1.2, 0.995, 0.01)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_tiny_board_rejected() {
        let config = AgentConfig::default().with_board(BoardConfig::new(1, 20));
        assert!(config.validate().is_err());
    }
}
