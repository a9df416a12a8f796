//! Cargo collection grid world
//!
//! A robot walks a square grid picking up cargo. Good cargo pays, bad cargo
//! costs, and a single time-limited cargo pays the most but expires after a
//! fixed number of steps. Observations are stacked one-hot layers meant for a
//! convolutional policy.

pub mod config;
pub mod entity;
pub mod env;
pub mod observation;

pub use config::CargoConfig;
pub use entity::{Cargo, CargoKind};
pub use env::{CargoLayout, CargoStep, CargoWorld};
pub use observation::{LAYER_BAD, LAYER_GOOD, LAYER_ROBOT, LAYER_TIME_LIMITED, OBSERVATION_LAYERS};
