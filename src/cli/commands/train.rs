//! Train command - Train the agent and save its Q-table

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::{
    cli::{
        config::AgentArgs,
        output::{format_number, print_kv, print_section},
    },
    pipeline::{
        JsonlObserver, LogObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Train the agent and save the model")]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub episodes: usize,

    /// Episodes per summary line
    #[arg(long, default_value_t = TrainingConfig::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name means a directory target
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let app = args.agent.app();
    let mut agent = app.create_agent(args.agent.agent_config())?;
    let mut game = args.agent.game();

    let config = TrainingConfig {
        episodes: args.episodes,
        batch_size: args.batch_size,
    };
    let mut pipeline = TrainingPipeline::new(config).with_observer(Box::new(LogObserver::new()));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent, &mut game)?;
    app.save_agent(&agent)?;
    info!("model saved to {}", args.agent.store_dir.display());

    print_training_result(&result);

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        result.save(&path)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

fn print_training_result(result: &TrainingResult) {
    print_section("Training Results");
    print_kv("Episodes", &format_number(result.episodes));
    if let Some(scores) = &result.scores {
        print_kv("Average score", &format!("{:.2}", scores.average));
        print_kv("Best score", &scores.max.to_string());
    }
    print_kv("Final epsilon", &format!("{:.4}", result.final_epsilon));
    print_kv("Visited states", &format_number(result.visited_states));
}
