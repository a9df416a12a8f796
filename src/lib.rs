//! Tabular reinforcement learning on small grid worlds
//!
//! This crate provides:
//! - A Q-learning trainer with reward shaping, a linearly decaying learning
//!   rate and an exponentially decaying exploration rate
//! - A slippery FrozenLake environment to train it on
//! - A cargo collection world with time-limited cargo and layered tensor
//!   observations
//! - Persistence, run observers and success reporting

pub mod adapters;
pub mod cargo_world;
pub mod cli;
pub mod error;
pub mod frozen_lake;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use cargo_world::{Cargo, CargoConfig, CargoKind, CargoLayout, CargoStep, CargoWorld};
pub use error::{Error, Result};
pub use frozen_lake::{FrozenLake, LakeAction, LakeMap, Tile};
pub use grid::{Direction, Position};
pub use pipeline::EvaluationAccumulator;
pub use ports::{DiscreteEnvironment, Environment, Mode, Observer, Step};
pub use q_learning::{
    ExponentialDecay, LinearDecay, QLearningTrainer, RewardShaping, RunSummary, SavedValueTable,
    TrainerConfig, TrainingMetadata, ValueTable,
};
