//! Dependency injection container for the snake agent.

use std::sync::Arc;

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::FileStore,
    ports::KeyValueStore,
    q_learning::{LoadOutcome, MODEL_KEY, QAgent},
};

/// Directory used by [`App::new`] for the model store.
pub const DEFAULT_STORE_DIR: &str = ".snake_q";

/// Application with dependency injection.
///
/// Owns the store the model is saved to and loaded from.
pub struct App {
    /// Store for the serialized Q-table
    store: Arc<dyn KeyValueStore + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app backed by a [`FileStore`] in [`DEFAULT_STORE_DIR`].
    pub fn new() -> Self {
        Self {
            store: Arc::new(FileStore::new(DEFAULT_STORE_DIR)),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Builder alias used by tests.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore + Send + Sync> {
        Arc::clone(&self.store)
    }

    /// Create an agent with a zeroed Q-table.
    ///
    /// The config seed takes precedence over the container default.
    pub fn create_agent(&self, mut config: AgentConfig) -> Result<QAgent> {
        config.seed = config.seed.or(self.default_seed);
        QAgent::new(config)
    }

    /// Create an agent and load the stored model into it.
    ///
    /// Falls back to a zeroed table when no usable model is stored.
    pub fn load_agent(&self, config: AgentConfig) -> Result<(QAgent, LoadOutcome)> {
        let mut agent = self.create_agent(config)?;
        let outcome = agent.load(self.store.as_ref())?;
        Ok((agent, outcome))
    }

    /// Persist the agent's Q-table.
    pub fn save_agent(&self, agent: &QAgent) -> Result<()> {
        agent.save(self.store.as_ref())
    }

    /// Delete the stored model.
    pub fn remove_model(&self) -> Result<()> {
        self.store.remove(MODEL_KEY)
    }

    /// Whether a model is currently stored.
    pub fn has_model(&self) -> Result<bool> {
        Ok(self.store.get(MODEL_KEY)?.is_some())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
pub struct AppBuilder {
    store: Option<Arc<dyn KeyValueStore + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            store: None,
            default_seed: None,
        }
    }

    /// Set a custom model store.
    pub fn with_store<S: KeyValueStore + Send + Sync + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no store was specified, uses a [`FileStore`] in [`DEFAULT_STORE_DIR`].
    pub fn build(self) -> App {
        App {
            store: self
                .store
                .unwrap_or_else(|| Arc::new(FileStore::new(DEFAULT_STORE_DIR))),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
