//! Play command - Watch the saved model play one game

use anyhow::Result;
use clap::Parser;
use log::warn;

use crate::{
    cli::{config::AgentArgs, output::print_kv},
    pipeline::play_episode,
    q_learning::LoadOutcome,
};

#[derive(Parser, Debug)]
#[command(about = "Play one greedy game with the saved model")]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Print every move
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = args.agent.app();
    let (mut agent, outcome) = app.load_agent(args.agent.agent_config())?;
    if let LoadOutcome::Fallback { reason } = &outcome {
        warn!("playing with an untrained agent: {reason}");
    }

    let mut game = args.agent.game();
    let mut steps = 0usize;
    let verbose = args.verbose;
    let score = play_episode(&mut agent, &mut game, |action, observation| {
        steps += 1;
        if verbose {
            let head = observation.head()?;
            println!(
                "{steps:>5} {action:<5} head ({}, {}) score {}",
                head.x, head.y, observation.score
            );
        }
        Ok(())
    })?;

    println!();
    print_kv("Steps", &steps.to_string());
    print_kv("Score", &score.to_string());
    Ok(())
}
