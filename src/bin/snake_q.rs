//! snake-q CLI - Train and run a tabular Q-learning Snake agent
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`, which prints one
//! summary line per batch of training episodes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use snake_qlearn::cli::commands::{evaluate, play, reset, train};

#[derive(Parser)]
#[command(name = "snake-q")]
#[command(version, about = "Tabular Q-learning agent for Snake", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent from scratch and save the model
    Train(train::TrainArgs),

    /// Evaluate the saved model over greedy games
    Evaluate(evaluate::EvaluateArgs),

    /// Play one greedy game with the saved model
    Play(play::PlayArgs),

    /// Delete the saved model
    Reset(reset::ResetArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => train::execute(args),
        Commands::Evaluate(args) => evaluate::execute(args),
        Commands::Play(args) => play::execute(args),
        Commands::Reset(args) => reset::execute(args),
    }
}
