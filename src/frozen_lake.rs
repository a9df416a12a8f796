//! Slippery FrozenLake grid world
//!
//! A local stand-in for Gymnasium's `FrozenLake-v1`, implementing the
//! [`DiscreteEnvironment`](crate::ports::DiscreteEnvironment) port so the
//! Q-learning trainer has something to run against.

pub mod env;
pub mod map;

pub use env::{FrozenLake, LakeAction};
pub use map::{DEFAULT_MAP, LakeMap, Tile};
