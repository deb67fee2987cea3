//! Observer port - abstraction for training observation and reporting
//!
//! This port defines the interface for observing training events, allowing
//! progress bars, log output and metric collection to be composed without
//! coupling the training loop to any of them.

use crate::{Result, analysis::BatchSummary, q_learning::Transition};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(episode, transition)` - After every learning update
///    - `on_episode_end(episode, score, epsilon)` - After epsilon decay
///    - `on_batch_complete(summary)` - After every full batch of episodes
/// 3. `on_training_end()` - Once at the end
///
/// Episode numbers are 0-based.
///
/// # Examples
///
/// ```no_run
/// use snake_qlearn::ports::Observer;
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _score: u32,
///         _epsilon: f64,
///     ) -> snake_qlearn::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, after the environment was reset.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each TD update.
    fn on_step(&mut self, _episode: usize, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the completed episode
    /// * `score` - Final score of the episode
    /// * `epsilon` - Exploration rate after this episode's decay
    fn on_episode_end(&mut self, _episode: usize, _score: u32, _epsilon: f64) -> Result<()> {
        Ok(())
    }

    /// Called once per completed batch with that batch's statistics.
    fn on_batch_complete(&mut self, _summary: &BatchSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes or is cancelled.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
