//! Observer implementations for training pipelines
//!
//! Observers allow composable reporting during training without coupling
//! the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{Result, analysis::BatchSummary, ports::Observer, q_learning::Transition};

/// Log observer - Writes one line per completed batch through `log`
#[derive(Debug, Default)]
pub struct LogObserver {
    lines: Vec<String>,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        info!("training for {total_episodes} episodes");
        Ok(())
    }

    fn on_batch_complete(&mut self, summary: &BatchSummary) -> Result<()> {
        let line = summary.to_string();
        info!("{line}");
        self.lines.push(line);
        Ok(())
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_score: u32,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_score: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, score: u32, epsilon: f64) -> Result<()> {
        self.best_score = self.best_score.max(score);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("best {} eps {epsilon:.3}", self.best_score));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("best {}", self.best_score));
        }
        Ok(())
    }
}

/// Record of one training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub score: u32,
    pub steps: usize,
    pub total_reward: f64,
    pub epsilon: f64,
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver<W: Write + Send = BufWriter<File>> {
    writer: W,
    steps: usize,
    total_reward: f64,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonlObserver<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            steps: 0,
            total_reward: 0.0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for JsonlObserver<W> {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.steps = 0;
        self.total_reward = 0.0;
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, transition: &Transition) -> Result<()> {
        self.steps += 1;
        self.total_reward += transition.reward;
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, score: u32, epsilon: f64) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            score,
            steps: self.steps,
            total_reward: self.total_reward,
            epsilon,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScoreStats;

    #[test]
    fn test_log_observer_keeps_lines() {
        let mut observer = LogObserver::new();
        let summary = BatchSummary {
            first_episode: 1,
            last_episode: 100,
            scores: ScoreStats::from_scores(&[0, 4]).unwrap(),
            epsilon: 0.6058,
        };
        observer.on_batch_complete(&summary).unwrap();
        assert_eq!(
            observer.lines(),
            ["Episodes 1-100: average 2.00, max 4, min 0, epsilon 0.6058"]
        );
    }

    #[test]
    fn test_jsonl_observer_writes_one_line_per_episode() {
        use crate::types::{Action, StateIndex};

        let mut observer = JsonlObserver::from_writer(Vec::new());
        let state = StateIndex::new(0).unwrap();
        let transition = Transition {
            state,
            action: Action::Up,
            reward: -0.01,
            next_state: state,
            terminal: false,
            learning_rate: 1.0,
        };

        for episode in 0..2 {
            observer.on_episode_start(episode).unwrap();
            observer.on_step(episode, &transition).unwrap();
            observer.on_step(episode, &transition).unwrap();
            observer.on_episode_end(episode, 0, 0.99).unwrap();
        }
        observer.on_training_end().unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let record: EpisodeRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(record.episode, 1);
        assert_eq!(record.steps, 2);
        assert!((record.total_reward + 0.02).abs() < 1e-12);
    }
}
