//! Training pipeline for the Q-learning agent

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    analysis::{BatchSummary, ScoreStats, ScoreWindow},
    ports::{Environment, Observer},
    q_learning::QAgent,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Episodes per reported batch
    pub batch_size: usize,
}

impl TrainingConfig {
    pub const DEFAULT_BATCH_SIZE: usize = 100;

    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes completed
    pub episodes: usize,

    /// Score statistics over every completed episode
    pub scores: Option<ScoreStats>,

    /// One entry per completed batch
    pub batches: Vec<BatchSummary>,

    /// Epsilon after the last completed episode
    pub final_epsilon: f64,

    /// States with at least one update
    pub visited_states: usize,

    /// Whether the run stopped early on request
    pub cancelled: bool,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Runs training episodes of a [`QAgent`] against an [`Environment`].
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            cancel: None,
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Stop before the next episode once `flag` becomes true.
    ///
    /// Episodes are never interrupted midway, so learned values are identical
    /// to those of an uncancelled run of the same length.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Train `agent` from a zeroed Q-table.
    ///
    /// Epsilon is taken from the agent as is and decays once per completed
    /// episode. Errors from the environment or an observer abort the run.
    pub fn run<E: Environment + ?Sized>(
        &mut self,
        agent: &mut QAgent,
        environment: &mut E,
    ) -> Result<TrainingResult> {
        agent.reset_table();
        let batch_size = self.config.batch_size.max(1);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut overall = ScoreWindow::new();
        let mut batch = ScoreWindow::new();
        let mut batches = Vec::new();
        let mut cancelled = false;

        for episode in 0..self.config.episodes {
            if self.is_cancelled() {
                info!("training cancelled after {episode} episodes");
                cancelled = true;
                break;
            }

            let score = self.run_episode(episode, agent, environment)?;
            let epsilon = agent.end_episode();
            debug!("episode {}: score {score}, epsilon {epsilon:.4}", episode + 1);

            for observer in &mut self.observers {
                observer.on_episode_end(episode, score, epsilon)?;
            }

            overall.record(score);
            batch.record(score);

            if batch.len() == batch_size {
                if let Some(scores) = batch.stats() {
                    let summary = BatchSummary {
                        first_episode: episode + 2 - batch_size,
                        last_episode: episode + 1,
                        scores,
                        epsilon,
                    };
                    for observer in &mut self.observers {
                        observer.on_batch_complete(&summary)?;
                    }
                    batches.push(summary);
                }
                batch.clear();
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult {
            episodes: overall.len(),
            scores: overall.stats(),
            batches,
            final_epsilon: agent.epsilon(),
            visited_states: agent.q_table().visited_states(),
            cancelled,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Play one episode with learning. Returns the final score.
    fn run_episode<E: Environment + ?Sized>(
        &mut self,
        episode: usize,
        agent: &mut QAgent,
        environment: &mut E,
    ) -> Result<u32> {
        environment.reset()?;
        agent.begin_episode();

        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut observation = environment.observe();
        let mut state = agent.encode(&observation)?;

        while !observation.terminal {
            let action = agent.select_action(state);
            environment.act(action);
            environment.step()?;

            observation = environment.observe();
            let transition = agent.learn(state, action, &observation)?;
            trace!(
                "{} --{}--> {} (reward {}, lr {:.4})",
                transition.state,
                transition.action,
                transition.next_state,
                transition.reward,
                transition.learning_rate
            );

            for observer in &mut self.observers {
                observer.on_step(episode, &transition)?;
            }
            state = transition.next_state;
        }

        Ok(observation.score)
    }
}
