//! Application layer with dependency injection container.
//!
//! The container owns the model store and wires it into agents, so the
//! agent itself never reaches for process-wide state.
//!
//! # Usage
//!
//! ## Production
//!
//! ```no_run
//! use snake_qlearn::app::{AgentConfig, App};
//!
//! let app = App::new();
//! let agent = app.create_agent(AgentConfig::default().with_seed(42))?;
//! app.save_agent(&agent)?;
//! # Ok::<(), snake_qlearn::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use snake_qlearn::adapters::InMemoryStore;
//! use snake_qlearn::app::App;
//!
//! let app = App::for_testing()
//!     .with_store(InMemoryStore::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, BoardConfig};
pub use container::{App, AppBuilder};
