//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod file_store;
pub mod in_memory_store;
pub mod snake_game;

pub use file_store::FileStore;
pub use in_memory_store::InMemoryStore;
pub use snake_game::{GameConfig, SnakeGame};
