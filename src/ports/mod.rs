//! Ports (trait boundaries) for external collaborators.
//!
//! The trainer and environments are written against these traits. Adapters
//! in [`crate::adapters`] and the environment modules implement them.

pub mod environment;
pub mod observer;
pub mod repository;

pub use environment::{DiscreteEnvironment, Environment, Step};
pub use observer::{EpisodeReport, Mode, Observer, StepEvent};
pub use repository::ValueTableRepository;
