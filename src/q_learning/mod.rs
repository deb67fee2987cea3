//! Tabular Q-learning for Snake
//!
//! Observations are discretized into one of 432 states, values are kept in a
//! dense Q-table updated with a visit-count learning rate, and actions are
//! chosen ε-greedily with random tie-breaking.
//!
//! ## Update rule
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | Learning rate | `lr = lpc / (lpc + N(s,a))`, N taken before the increment |
//! | Target | `r + γ max_a' Q(s',a')` |
//! | Update | `Q(s,a) += lr (target - Q(s,a))` |
//!
//! ## Usage Example
//!
//! ```no_run
//! use snake_qlearn::{
//!     adapters::{InMemoryStore, SnakeGame},
//!     app::AgentConfig,
//!     q_learning::QAgent,
//! };
//!
//! let mut agent = QAgent::new(AgentConfig::default().with_seed(42))?;
//! let mut game = SnakeGame::with_seed(42);
//! agent.train(&mut game, 1000)?;
//!
//! let store = InMemoryStore::new();
//! agent.save(&store)?;
//! # Ok::<(), snake_qlearn::Error>(())
//! ```

pub mod agent;
pub mod encoder;
pub mod policy;
pub mod q_table;
pub mod serialization;

pub use agent::{LoadOutcome, QAgent, Transition, reward_for};
pub use encoder::StateEncoder;
pub use q_table::QTable;
pub use serialization::MODEL_KEY;
