//! Evaluate command - play greedy rounds with a trained table

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    Error,
    adapters::MsgPackRepository,
    cli::{
        config::load_lake_map,
        output::{format_percentage, print_kv, print_section, print_subsection},
    },
    frozen_lake::{FrozenLake, LakeMap},
    pipeline::{EvaluationAccumulator, ProgressObserver},
    ports::{Mode, ValueTableRepository},
    q_learning::{QLearningTrainer, TrainerConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained value table")]
pub struct EvaluateArgs {
    /// Path to the trained table
    #[arg(long, short = 'm', default_value = "frozen_lake8x8.msgpack")]
    pub model: PathBuf,

    /// Episodes per round
    #[arg(long, short = 'e', default_value_t = 1_000)]
    pub episodes: usize,

    /// Number of evaluation rounds
    #[arg(long, short = 'r', default_value_t = 10)]
    pub rounds: usize,

    /// Random seed; round `i` uses `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lake layout the table was trained on (defaults to the saved layout)
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Show a progress bar for each round
    #[arg(long)]
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationExport<'a> {
    model: String,
    episodes_per_round: usize,
    rounds: &'a [f64],
    skipped_rounds: usize,
    average_success_percentage: Option<f64>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    print_section("Evaluation");
    print_kv("Model", &args.model.display().to_string());
    print_kv("Episodes per round", &args.episodes.to_string());
    print_kv("Rounds", &args.rounds.to_string());

    print_subsection("Rounds");
    let results = evaluate(&args)?;

    match results.average() {
        Some(average) => print_kv("Average success", &format_percentage(average)),
        None => println!("  No round completed"),
    }

    if let Some(path) = &args.export {
        let export = EvaluationExport {
            model: args.model.display().to_string(),
            episodes_per_round: args.episodes,
            rounds: results.rounds(),
            skipped_rounds: results.skipped(),
            average_success_percentage: results.average(),
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}

/// Run every round and collect their success percentages.
///
/// The model is loaded afresh for each round. A missing model skips that
/// round instead of failing the whole evaluation.
pub fn evaluate(args: &EvaluateArgs) -> Result<EvaluationAccumulator> {
    let repo = MsgPackRepository::new();
    let mut results = EvaluationAccumulator::new();

    for round in 0..args.rounds {
        let saved = match repo.load(&args.model) {
            Ok(saved) => saved,
            Err(Error::ModelNotFound { path }) => {
                log::warn!("round {}: no model at {}", round + 1, path.display());
                println!("  Round {:>2}: skipped (model not found)", round + 1);
                results.record_skipped();
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to load model from {}", args.model.display())
                });
            }
        };

        let map = match (&args.map, &saved.metadata.map) {
            (None, Some(rows)) => LakeMap::parse(rows)?,
            (path, _) => load_lake_map(path.as_deref())?,
        };
        let mut env = FrozenLake::new(map);
        if let Some(seed) = args.seed {
            env = env.with_seed(seed.wrapping_add(round as u64));
        }

        let table = saved.into_table()?;
        let mut trainer = QLearningTrainer::new(TrainerConfig::default()).with_table(table);
        if args.progress {
            trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
        }

        let summary = trainer
            .run(&mut env, args.episodes, Mode::Evaluation)
            .with_context(|| format!("Evaluation round {} failed", round + 1))?;
        let percentage = summary.success_percentage();
        println!(
            "  Round {:>2}: {}",
            round + 1,
            format_percentage(percentage)
        );
        results.record_round(percentage);
    }

    Ok(results)
}
