//! Ports (trait boundaries) for external collaborators.
//!
//! The agent is owned by the domain; the game simulator, the model store and
//! training observers sit behind these traits and are implemented by adapters.

pub mod environment;
pub mod observer;
pub mod store;

pub use environment::Environment;
pub use observer::Observer;
pub use store::KeyValueStore;
