//! gridlearn CLI - tabular Q-learning on a slippery lake and a cargo
//! collection grid world
//!
//! - Train a value table with reward shaping and decay schedules
//! - Evaluate it over repeated greedy rounds
//! - Run a random policy in the cargo world

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridlearn")]
#[command(version, about = "Reinforcement learning exercises on grid worlds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent on the slippery lake
    Train(gridlearn::cli::commands::train::TrainArgs),

    /// Evaluate a trained value table over several rounds
    Evaluate(gridlearn::cli::commands::evaluate::EvaluateArgs),

    /// Run a random policy in the cargo collection world
    Cargo(gridlearn::cli::commands::cargo::CargoArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => gridlearn::cli::commands::train::execute(args),
        Commands::Evaluate(args) => gridlearn::cli::commands::evaluate::execute(args),
        Commands::Cargo(args) => gridlearn::cli::commands::cargo::execute(args),
    }
}
