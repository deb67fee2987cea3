//! Evaluate command - Play greedy games with the saved model

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use crate::{
    cli::{
        config::AgentArgs,
        output::{print_kv, print_section},
    },
    pipeline::evaluate,
    q_learning::LoadOutcome,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the saved model with greedy play")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Export results to file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = args.agent.app();
    let (mut agent, outcome) = app.load_agent(args.agent.agent_config())?;
    if let LoadOutcome::Fallback { reason } = &outcome {
        warn!("evaluating an untrained agent: {reason}");
    }

    let mut game = args.agent.game();
    let result = evaluate(&mut agent, &mut game, args.games)?;

    print_section("Evaluation Results");
    print_kv("Games", &result.scores.len().to_string());
    match &result.stats {
        Some(stats) => {
            print_kv("Average score", &format!("{:.2}", stats.average));
            print_kv("Best score", &stats.max.to_string());
            print_kv("Worst score", &stats.min.to_string());
        }
        None => print_kv("Average score", "n/a"),
    }

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}
