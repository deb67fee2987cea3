//! Tabular Q-learning agent for the game of Snake
//!
//! This crate provides:
//! - A 432-state discretization of Snake observations
//! - A Q-table with visit-count learning rates and ε-greedy action selection
//! - A training pipeline with periodic batch summaries and observers
//! - Model persistence through a pluggable key-value store
//! - A reference Snake simulator and a `snake-q` command-line tool

pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use types::{Action, Observation, Position, StateIndex};
