//! Running score statistics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accumulates episode scores (sum, max, min) over a window of episodes.
#[derive(Debug, Clone, Default)]
pub struct ScoreWindow {
    count: usize,
    total: u64,
    max: Option<u32>,
    min: Option<u32>,
}

impl ScoreWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, score: u32) {
        self.count += 1;
        self.total += u64::from(score);
        self.max = Some(self.max.map_or(score, |m| m.max(score)));
        self.min = Some(self.min.map_or(score, |m| m.min(score)));
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Summary of the recorded scores, or `None` if nothing was recorded.
    pub fn stats(&self) -> Option<ScoreStats> {
        Some(ScoreStats {
            episodes: self.count,
            average: self.total as f64 / self.count as f64,
            max: self.max?,
            min: self.min?,
        })
    }

    /// Start a fresh window.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Average, max and min over a set of episode scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub episodes: usize,
    pub average: f64,
    pub max: u32,
    pub min: u32,
}

impl ScoreStats {
    /// Statistics over a slice of scores.
    pub fn from_scores(scores: &[u32]) -> Option<Self> {
        let mut window = ScoreWindow::new();
        scores.iter().for_each(|&score| window.record(score));
        window.stats()
    }
}

/// Report emitted after every completed batch of training episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// First episode of the batch (1-based)
    pub first_episode: usize,
    /// Last episode of the batch (1-based, inclusive)
    pub last_episode: usize,
    pub scores: ScoreStats,
    /// Epsilon after the last episode of the batch
    pub epsilon: f64,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Episodes {}-{}: average {:.2}, max {}, min {}, epsilon {:.4}",
            self.first_episode,
            self.last_episode,
            self.scores.average,
            self.scores.max,
            self.scores.min,
            self.epsilon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_has_no_stats() {
        let window = ScoreWindow::new();
        assert!(window.is_empty());
        assert!(window.stats().is_none());
    }

    #[test]
    fn test_window_tracks_sum_max_min() {
        let mut window = ScoreWindow::new();
        for score in [3, 0, 7, 2] {
            window.record(score);
        }
        let stats = window.stats().unwrap();
        assert_eq!(stats.episodes, 4);
        assert_eq!(stats.average, 3.0);
        assert_eq!(stats.max, 7);
        assert_eq!(stats.min, 0);

        window.clear();
        assert!(window.is_empty());
    }

    #[test]
    fn test_batch_summary_line() {
        let summary = BatchSummary {
            first_episode: 101,
            last_episode: 200,
            scores: ScoreStats::from_scores(&[1, 2]).unwrap(),
            epsilon: 0.367_004,
        };
        assert_eq!(
            summary.to_string(),
            "Episodes 101-200: average 1.50, max 2, min 1, epsilon 0.3670"
        );
    }
}
