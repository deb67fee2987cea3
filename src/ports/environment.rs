//! Environment port - the game the agent learns to play.

use crate::{
    Result,
    types::{Action, Observation},
};

/// Snake environment driven one step at a time.
///
/// # Event Sequence
///
/// 1. `reset()` - fresh snake, fresh food, score 0, not terminal
/// 2. Until `observe().terminal`:
///    - `act(action)` - record the requested heading
///    - `step()` - advance the simulation by one cell
///
/// # Examples
///
/// ```
/// use snake_qlearn::{adapters::SnakeGame, ports::Environment, types::Action};
///
/// let mut game = SnakeGame::with_seed(7);
/// game.reset()?;
/// game.act(Action::Up);
/// game.step()?;
/// assert_eq!(game.observe().body.len(), 1);
/// # Ok::<(), snake_qlearn::Error>(())
/// ```
pub trait Environment {
    /// Return to an initial configuration.
    fn reset(&mut self) -> Result<()>;

    /// Current observation.
    fn observe(&self) -> Observation;

    /// Request a heading. A request that exactly reverses the current
    /// heading is ignored.
    fn act(&mut self, action: Action);

    /// Advance the simulation by one step using the last recorded heading.
    fn step(&mut self) -> Result<()>;
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn observe(&self) -> Observation {
        (**self).observe()
    }

    fn act(&mut self, action: Action) {
        (**self).act(action)
    }

    fn step(&mut self) -> Result<()> {
        (**self).step()
    }
}
