//! Q-learning agent for Snake
//!
//! The agent owns its Q-table, its exploration schedule and the score it last
//! observed, which drives the reward function.

use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    app::AgentConfig,
    pipeline::{LogObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    ports::{Environment, KeyValueStore},
    q_learning::{
        encoder::StateEncoder,
        policy,
        q_table::QTable,
        serialization::{MODEL_KEY, decode_model, encode_model},
    },
    types::{Action, Observation, StateIndex},
};

/// Reward for an action that ended the episode.
pub const DEATH_REWARD: f64 = -10.0;
/// Reward for an action that increased the score.
pub const FOOD_REWARD: f64 = 10.0;
/// Reward for any other step.
pub const STEP_REWARD: f64 = -0.01;

/// Reward for reaching `observation` when the previously recorded score was
/// `previous_score`. Termination dominates any score change.
pub fn reward_for(previous_score: u32, observation: &Observation) -> f64 {
    if observation.terminal {
        DEATH_REWARD
    } else if observation.score > previous_score {
        FOOD_REWARD
    } else {
        STEP_REWARD
    }
}

/// One learning step. Used to drive a single update and then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: StateIndex,
    pub action: Action,
    pub reward: f64,
    pub next_state: StateIndex,
    pub terminal: bool,
    /// Learning rate applied by the update
    pub learning_rate: f64,
}

/// Result of [`QAgent::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored model replaced the Q-table
    Loaded,
    /// No usable model was stored; the Q-table was zeroed
    Fallback { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent with a visit-count learning rate and ε-greedy
/// exploration.
#[derive(Debug, Clone)]
pub struct QAgent {
    config: AgentConfig,
    encoder: StateEncoder,
    q_table: QTable,
    epsilon: f64,
    /// Score recorded after the previous step of the current episode
    points: u32,
    rng: StdRng,
}

impl QAgent {
    /// Create an agent with a zeroed Q-table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation,
    /// in particular when `lpc` is not strictly positive.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            encoder: StateEncoder::new(config.board),
            q_table: QTable::new(config.lpc, config.gamma),
            epsilon: config.epsilon,
            points: 0,
            rng: build_rng(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn encoder(&self) -> &StateEncoder {
        &self.encoder
    }

    /// Read access to the learned values, e.g. for display.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Score recorded after the latest step.
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn encode(&self, observation: &Observation) -> Result<StateIndex> {
        self.encoder.encode(observation)
    }

    /// Forget the score of the previous episode.
    pub fn begin_episode(&mut self) {
        self.points = 0;
    }

    /// ε-greedy action for `state` using the agent's current epsilon.
    pub fn select_action(&mut self, state: StateIndex) -> Action {
        policy::select_action(&self.q_table, state, self.epsilon, &mut self.rng)
    }

    /// ε-greedy action for an observation with a caller-supplied epsilon.
    pub fn act(&mut self, observation: &Observation, epsilon: f64) -> Result<Action> {
        let state = self.encoder.encode(observation)?;
        Ok(policy::select_action(
            &self.q_table,
            state,
            epsilon,
            &mut self.rng,
        ))
    }

    /// Best known action for an observation (no exploration).
    pub fn greedy_action(&mut self, observation: &Observation) -> Result<Action> {
        self.act(observation, 0.0)
    }

    /// Reward for reaching `observation` from the recorded score.
    pub fn reward(&self, observation: &Observation) -> f64 {
        reward_for(self.points, observation)
    }

    /// Learn from taking `action` in `state` and landing in `next`.
    ///
    /// Encodes `next`, applies the TD update and records the new score.
    pub fn learn(
        &mut self,
        state: StateIndex,
        action: Action,
        next: &Observation,
    ) -> Result<Transition> {
        let next_state = self.encoder.encode(next)?;
        let reward = self.reward(next);
        let learning_rate = self.q_table.update(state, action, reward, next_state);
        self.points = next.score;

        Ok(Transition {
            state,
            action,
            reward,
            next_state,
            terminal: next.terminal,
            learning_rate,
        })
    }

    /// Decay epsilon once at the end of an episode. Returns the new value.
    pub fn end_episode(&mut self) -> f64 {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
        self.epsilon
    }

    /// Zero the Q-table and visit counts.
    pub fn reset_table(&mut self) {
        self.q_table.reset();
    }

    /// Zero the table and restore the initial epsilon and RNG state.
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.epsilon = self.config.epsilon;
        self.points = 0;
        self.rng = build_rng(self.config.seed);
    }

    /// Train from a zeroed table for `episodes` episodes, logging a summary
    /// every 100 episodes.
    pub fn train<E: Environment + ?Sized>(
        &mut self,
        environment: &mut E,
        episodes: usize,
    ) -> Result<TrainingResult> {
        TrainingPipeline::new(TrainingConfig::new(episodes))
            .with_observer(Box::new(LogObserver::new()))
            .run(self, environment)
    }

    /// Write the Q-values to `store` under [`MODEL_KEY`].
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let text = encode_model(&self.q_table)?;
        store.set(MODEL_KEY, &text)?;
        info!(
            "saved Q-table ({} non-zero states) under '{MODEL_KEY}'",
            self.q_table.nonzero_states()
        );
        Ok(())
    }

    /// Replace the Q-table with the stored model.
    ///
    /// A missing or unreadable model is not an error: the table is zeroed and
    /// the reason reported as [`LoadOutcome::Fallback`]. Failures of the store
    /// itself are propagated.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<LoadOutcome> {
        let Some(text) = store.get(MODEL_KEY)? else {
            self.q_table.reset();
            info!("no saved model found, initialized new Q-table");
            return Ok(LoadOutcome::Fallback {
                reason: format!("no model stored under '{MODEL_KEY}'"),
            });
        };

        match decode_model(&text) {
            Ok(rows) => {
                self.q_table.replace_values(rows);
                info!("model loaded from '{MODEL_KEY}'");
                Ok(LoadOutcome::Loaded)
            }
            Err(Error::InvalidModel { reason }) => {
                self.q_table.reset();
                warn!("stored model is unreadable ({reason}), initialized new Q-table");
                Ok(LoadOutcome::Fallback { reason })
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryStore, types::Position};

    fn observation(score: u32, terminal: bool) -> Observation {
        Observation {
            body: vec![Position::new(10, 10)],
            food: Position::new(3, 3),
            score,
            terminal,
        }
    }

    fn agent() -> QAgent {
        QAgent::new(AgentConfig::default().with_seed(5)).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_lpc() {
        let result = QAgent::new(AgentConfig::default().with_lpc(0.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_reward_law() {
        assert_eq!(reward_for(0, &observation(1, true)), DEATH_REWARD);
        assert_eq!(reward_for(3, &observation(3, true)), DEATH_REWARD);
        assert_eq!(reward_for(0, &observation(1, false)), FOOD_REWARD);
        assert_eq!(reward_for(2, &observation(2, false)), STEP_REWARD);
    }

    #[test]
    fn test_learn_records_score_every_step() {
        let mut agent = agent();
        agent.begin_episode();
        let state = agent.encode(&observation(0, false)).unwrap();

        let eaten = agent.learn(state, Action::Up, &observation(1, false)).unwrap();
        assert_eq!(eaten.reward, FOOD_REWARD);
        assert_eq!(agent.points(), 1);

        let idle = agent.learn(state, Action::Up, &observation(1, false)).unwrap();
        assert_eq!(idle.reward, STEP_REWARD);

        agent.begin_episode();
        assert_eq!(agent.points(), 0);
    }

    #[test]
    fn test_first_update_is_full_replacement() {
        let mut agent = agent();
        let obs = observation(0, false);
        let state = agent.encode(&obs).unwrap();

        let transition = agent.learn(state, Action::Left, &observation(0, true)).unwrap();

        assert_eq!(transition.learning_rate, 1.0);
        assert!(transition.terminal);
        // next state has an all-zero row, so Q = reward exactly
        assert_eq!(agent.q_table().get(state, Action::Left), DEATH_REWARD);
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut agent = agent();
        assert_eq!(agent.epsilon(), 1.0);
        assert!((agent.end_episode() - 0.995).abs() < 1e-12);
        for _ in 0..2000 {
            agent.end_episode();
        }
        assert_eq!(agent.epsilon(), 0.01);

        agent.reset();
        assert_eq!(agent.epsilon(), 1.0);
    }

    #[test]
    fn test_load_without_model_falls_back() {
        let store = InMemoryStore::new();
        let mut agent = agent();
        let state = agent.encode(&observation(0, false)).unwrap();
        agent.learn(state, Action::Up, &observation(1, false)).unwrap();

        let outcome = agent.load(&store).unwrap();
        assert!(matches!(outcome, LoadOutcome::Fallback { .. }));
        assert_eq!(agent.q_table().nonzero_states(), 0);
    }

    #[test]
    fn test_load_corrupt_model_falls_back() {
        let store = InMemoryStore::new();
        store.set(MODEL_KEY, "{\"1\": [1, 2]}").unwrap();

        let mut agent = agent();
        let outcome = agent.load(&store).unwrap();
        assert!(!outcome.is_loaded());
        assert_eq!(agent.q_table().nonzero_states(), 0);
    }

    #[test]
    fn test_save_then_load_restores_values() {
        let store = InMemoryStore::new();
        let mut trained = agent();
        let state = trained.encode(&observation(0, false)).unwrap();
        trained.learn(state, Action::Right, &observation(1, false)).unwrap();
        trained.save(&store).unwrap();

        let mut fresh = agent();
        assert!(fresh.load(&store).unwrap().is_loaded());
        assert_eq!(
            fresh.q_table().get(state, Action::Right),
            trained.q_table().get(state, Action::Right)
        );
        // visit counts are not part of the model
        assert_eq!(fresh.q_table().visited_states(), 0);
    }
}
