//! Command-line interface for training, evaluating and exploring the grid
//! worlds.

pub mod commands;
pub mod config;
pub mod output;
