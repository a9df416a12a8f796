//! Train command - learn a value table for the slippery lake

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::{
        config::{load_json_config, load_lake_map},
        output::{format_number, format_percentage, print_kv, print_section},
    },
    frozen_lake::FrozenLake,
    pipeline::{HistoryObserver, MetricsObserver, ProgressObserver},
    ports::{Mode, ValueTableRepository},
    q_learning::{QLearningTrainer, RunSummary, SavedValueTable, TrainerConfig, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on the slippery lake")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 15_000)]
    pub episodes: usize,

    /// Where to save the trained table
    #[arg(long, short = 'o', default_value = "frozen_lake8x8.msgpack")]
    pub output: PathBuf,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Trainer hyperparameters as JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lake layout, one row of S/F/H/G per line
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Write the per-episode success history as CSV
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let summary = train(&args)?;

    print_section("Training Results");
    print_kv("Episodes", &format_number(summary.episodes.len()));
    print_kv("Successes", &format_number(summary.successes()));
    print_kv(
        "Success rate",
        &format_percentage(summary.success_percentage()),
    );
    print_kv(
        "Final epsilon",
        &format!("{:.4}", summary.final_exploration_rate),
    );
    println!("\n✓ Saved value table to: {}", args.output.display());

    Ok(())
}

/// Train, save the table to `args.output` and return the run summary.
pub fn train(args: &TrainArgs) -> Result<RunSummary> {
    let mut config: TrainerConfig = load_json_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let map = load_lake_map(args.map.as_deref())?;
    let map_rows = map.to_rows();

    let mut env = FrozenLake::new(map);
    if let Some(seed) = config.seed {
        env = env.with_seed(seed.wrapping_add(1));
    }

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut trainer = QLearningTrainer::new(config.clone()).with_observer(Box::new(metrics.clone()));
    if !args.no_progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.history {
        trainer = trainer.with_observer(Box::new(HistoryObserver::new(path)));
    }

    let summary = trainer
        .run(&mut env, args.episodes, Mode::Training)
        .context("Training failed")?;

    let metrics = metrics
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .summary();
    log::info!(
        "{} updates, {} with the lock-in rate, mean episode length {:.1}",
        metrics.updates,
        metrics.lock_in_updates,
        metrics.avg_episode_length
    );

    let table = trainer
        .into_table()
        .context("Training finished without a value table")?;
    let saved = SavedValueTable::new(
        table,
        TrainingMetadata {
            episodes_trained: Some(args.episodes),
            seed: config.seed,
            map: Some(map_rows),
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs().to_string()),
        },
    );
    MsgPackRepository::new()
        .save(&saved, &args.output)
        .with_context(|| format!("Failed to save value table to {}", args.output.display()))?;

    Ok(summary)
}
