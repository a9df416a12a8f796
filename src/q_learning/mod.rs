//! Tabular Q-learning
//!
//! Off-policy TD control over a dense value table. The trainer is written
//! against the [`DiscreteEnvironment`](crate::ports::DiscreteEnvironment)
//! port and never sees the environment's native reward directly: every
//! transition is classified and reshaped before it reaches the update.
//!
//! ## Update
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α [target - Q(s,a)]
//!
//! target = r + γ max_a' Q(s',a')    truncated, or still running
//! target = r                        terminated
//! ```
//!
//! ## Schedules
//!
//! | Parameter | Schedule | Default |
//! |-----------|----------|---------|
//! | α | linear to the floor at 90% of the run | 0.7 → 0.01 |
//! | α on a positive shaped reward | fixed | 0.9 |
//! | ε | ×0.9995 per episode | 1.0 → 0.01 |
//! | γ | fixed | 0.97 |

pub mod config;
pub mod q_table;
pub mod schedule;
pub mod serialization;
pub mod shaping;
pub mod trainer;

pub use config::TrainerConfig;
pub use q_table::ValueTable;
pub use schedule::{ExponentialDecay, LinearDecay};
pub use serialization::{SavedValueTable, TrainingMetadata};
pub use shaping::{RewardShaping, TransitionKind};
pub use trainer::{QLearningTrainer, RunSummary, td_target};
