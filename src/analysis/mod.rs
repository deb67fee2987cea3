//! Score statistics for training batches and evaluation runs

pub mod stats;

pub use stats::{BatchSummary, ScoreStats, ScoreWindow};
