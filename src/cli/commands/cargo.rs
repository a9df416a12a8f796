//! Cargo command - run a random policy in the cargo world

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    cargo_world::{Cargo, CargoConfig, CargoWorld},
    cli::{
        config::load_json_config,
        output::{print_kv, print_section, print_subsection},
    },
    ports::Environment,
};

#[derive(Parser, Debug)]
#[command(about = "Run a random policy in the cargo world")]
pub struct CargoArgs {
    /// Number of episodes
    #[arg(long, short = 'e', default_value_t = 10)]
    pub episodes: usize,

    /// Random seed for placement and actions (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// World parameters as JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// End episodes once every good cargo is collected
    #[arg(long)]
    pub latch_completion: bool,
}

/// Outcome of one random-policy episode
#[derive(Debug, Clone, Serialize)]
pub struct CargoEpisode {
    pub episode: usize,
    pub steps: usize,
    pub score: f64,
    pub goods_collected: usize,
    pub bads_collected: usize,
    pub time_limited_collected: bool,
}

pub fn execute(args: CargoArgs) -> Result<()> {
    print_section("Cargo World (random policy)");
    let episodes = run(&args)?;

    print_subsection("Episodes");
    for ep in &episodes {
        println!(
            "  Episode {:>3}: score {:>7.1} in {} steps (good {}, bad {}, time-limited {})",
            ep.episode + 1,
            ep.score,
            ep.steps,
            ep.goods_collected,
            ep.bads_collected,
            if ep.time_limited_collected { "yes" } else { "no" }
        );
    }

    if !episodes.is_empty() {
        let mean = episodes.iter().map(|ep| ep.score).sum::<f64>() / episodes.len() as f64;
        print_subsection("Summary");
        print_kv("Mean score", &format!("{mean:.2}"));
    }
    Ok(())
}

/// Play `args.episodes` episodes with uniformly random actions.
pub fn run(args: &CargoArgs) -> Result<Vec<CargoEpisode>> {
    let mut config: CargoConfig = load_json_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.latch_completion {
        config.latch_completion = true;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let mut world = CargoWorld::new(config).context("Invalid cargo world configuration")?;

    let mut episodes = Vec::with_capacity(args.episodes);
    for episode in 0..args.episodes {
        world.reset();
        loop {
            let action = rng.random_range(0..world.action_count());
            if Environment::step(&mut world, action)?.is_done() {
                break;
            }
        }

        let collected = |cargo: &[Cargo]| cargo.iter().filter(|c| !c.is_active()).count();
        // expired cargo has no lifetime left, collected cargo keeps what it had
        let time_limited = world.time_limited();
        let record = CargoEpisode {
            episode,
            steps: world.steps(),
            score: world.score(),
            goods_collected: collected(world.goods()),
            bads_collected: collected(world.bads()),
            time_limited_collected: !time_limited.is_active()
                && time_limited.lifetime_fraction().is_some_and(|f| f > 0.0),
        };
        log::debug!("cargo episode {episode}: {record:?}");
        episodes.push(record);
    }

    Ok(episodes)
}
