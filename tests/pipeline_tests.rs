//! End-to-end tests of training, evaluation and play.

use std::sync::{Arc, Mutex};

use snake_qlearn::{
    Result,
    adapters::{GameConfig, SnakeGame},
    analysis::BatchSummary,
    app::{AgentConfig, BoardConfig},
    pipeline::{Observer, TrainingConfig, TrainingPipeline, evaluate, play_episode},
    q_learning::QAgent,
};

struct BatchCollector(Arc<Mutex<Vec<BatchSummary>>>);

impl Observer for BatchCollector {
    fn on_batch_complete(&mut self, summary: &BatchSummary) -> Result<()> {
        self.0.lock().unwrap().push(*summary);
        Ok(())
    }
}

#[test]
fn hundred_episodes_learn_and_report_one_batch() {
    let mut agent = QAgent::new(AgentConfig::default().with_seed(2024)).unwrap();
    let mut game = SnakeGame::with_seed(2025);

    let result = agent.train(&mut game, 100).unwrap();

    assert_eq!(result.episodes, 100);
    assert_eq!(result.batches.len(), 1);
    assert_eq!(result.batches[0].first_episode, 1);
    assert_eq!(result.batches[0].last_episode, 100);
    assert!((result.final_epsilon - 0.995_f64.powi(100)).abs() < 1e-12);
    assert!(agent.q_table().nonzero_states() > 0);
    assert!(result.visited_states > 0);
}

#[test]
fn epsilon_reaches_floor_on_long_runs() {
    let config = AgentConfig::default()
        .with_seed(1)
        .with_board(BoardConfig::square(5));
    let mut agent = QAgent::new(config).unwrap();
    let mut game = SnakeGame::new(GameConfig::new(BoardConfig::square(5)), Some(1));

    let result = agent.train(&mut game, 1000).unwrap();

    // 0.995^919 drops below 0.01
    assert_eq!(result.final_epsilon, 0.01);
    assert_eq!(result.batches.len(), 10);
}

#[test]
fn observers_receive_every_batch() {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let mut agent = QAgent::new(AgentConfig::default().with_seed(3)).unwrap();
    let mut game = SnakeGame::with_seed(3);

    let result = TrainingPipeline::new(TrainingConfig {
        episodes: 30,
        batch_size: 10,
    })
    .with_observer(Box::new(BatchCollector(Arc::clone(&batches))))
    .run(&mut agent, &mut game)
    .unwrap();

    assert_eq!(*batches.lock().unwrap(), result.batches);
    assert_eq!(result.batches.len(), 3);
    assert_eq!(result.batches[2].first_episode, 21);
}

#[test]
fn greedy_evaluation_after_training_is_stable() {
    let mut agent = QAgent::new(AgentConfig::default().with_seed(11)).unwrap();
    let mut game = SnakeGame::with_seed(12);
    agent.train(&mut game, 200).unwrap();
    let table = agent.q_table().clone();

    let result = evaluate(&mut agent, &mut game, 20).unwrap();
    assert_eq!(result.scores.len(), 20);

    let mut moves = 0;
    play_episode(&mut agent, &mut game, |_, _| {
        moves += 1;
        Ok(())
    })
    .unwrap();
    assert!(moves > 0);
    assert_eq!(agent.q_table(), &table);
}
