//! Command-line interface for training, evaluating and playing the agent

pub mod commands;
pub mod config;
pub mod output;
