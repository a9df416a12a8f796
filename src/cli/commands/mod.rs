//! Subcommands of the `gridlearn` binary

pub mod cargo;
pub mod evaluate;
pub mod train;
