//! Greedy evaluation and play of a trained agent
//!
//! Neither function updates the Q-table, the visit counts or epsilon.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    analysis::ScoreStats,
    ports::Environment,
    q_learning::QAgent,
    types::{Action, Observation},
};

/// Scores of a batch of greedy games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub scores: Vec<u32>,
    pub stats: Option<ScoreStats>,
}

/// Play `games` greedy episodes (ε = 0) and collect their scores.
pub fn evaluate<E: Environment + ?Sized>(
    agent: &mut QAgent,
    environment: &mut E,
    games: usize,
) -> Result<EvaluationResult> {
    let mut scores = Vec::with_capacity(games);
    for game in 0..games {
        let score = play_episode(agent, environment, |_, _| Ok(()))?;
        debug!("evaluation game {}: score {score}", game + 1);
        scores.push(score);
    }
    let stats = ScoreStats::from_scores(&scores);
    Ok(EvaluationResult { scores, stats })
}

/// Play one greedy episode from a fresh reset, calling `on_step` with each
/// chosen action and the observation that followed it. Returns the final
/// score.
pub fn play_episode<E, F>(agent: &mut QAgent, environment: &mut E, mut on_step: F) -> Result<u32>
where
    E: Environment + ?Sized,
    F: FnMut(Action, &Observation) -> Result<()>,
{
    environment.reset()?;
    let mut observation = environment.observe();
    while !observation.terminal {
        let action = agent.greedy_action(&observation)?;
        environment.act(action);
        environment.step()?;
        observation = environment.observe();
        on_step(action, &observation)?;
    }
    Ok(observation.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::SnakeGame, app::AgentConfig};

    #[test]
    fn test_evaluation_does_not_learn() {
        let mut agent = QAgent::new(AgentConfig::default().with_seed(1)).unwrap();
        let mut game = SnakeGame::with_seed(1);
        agent.train(&mut game, 20).unwrap();

        let table_before = agent.q_table().clone();
        let epsilon_before = agent.epsilon();

        let result = evaluate(&mut agent, &mut game, 10).unwrap();

        assert_eq!(result.scores.len(), 10);
        assert_eq!(result.stats.unwrap().episodes, 10);
        assert_eq!(agent.q_table(), &table_before);
        assert_eq!(agent.epsilon(), epsilon_before);
    }

    #[test]
    fn test_play_reports_every_step() {
        let mut agent = QAgent::new(AgentConfig::default().with_seed(2)).unwrap();
        let mut game = SnakeGame::with_seed(2);

        let mut steps = 0;
        let mut last_terminal = false;
        let score = play_episode(&mut agent, &mut game, |_, obs| {
            steps += 1;
            last_terminal = obs.terminal;
            Ok(())
        })
        .unwrap();

        assert!(steps > 0);
        assert!(last_terminal);
        assert_eq!(score, game.score());
    }

    #[test]
    fn test_zero_games_has_no_stats() {
        let mut agent = QAgent::new(AgentConfig::default()).unwrap();
        let mut game = SnakeGame::with_seed(3);
        let result = evaluate(&mut agent, &mut game, 0).unwrap();
        assert!(result.scores.is_empty());
        assert!(result.stats.is_none());
    }
}
