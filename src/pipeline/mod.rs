//! Training and evaluation pipelines
//!
//! This module provides:
//! - The episodic training loop with batch reporting and cancellation
//! - Greedy evaluation and step-by-step play of a trained agent
//! - Observers for logging, progress bars and JSONL export

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationResult, evaluate, play_episode};
pub use observers::{EpisodeRecord, JsonlObserver, LogObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
