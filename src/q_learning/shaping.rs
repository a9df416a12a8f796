//! Reward shaping for the slippery lake
//!
//! The learner never sees the environment's native reward. Each transition is
//! classified and mapped to a fixed signal instead.

use serde::{Deserialize, Serialize};

/// How a transition ended, from the learner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Terminated with a positive raw reward (reached the goal)
    Success,
    /// Terminated without reward (fell into a hole)
    Failure,
    /// Anything else, truncation included
    Step,
}

impl TransitionKind {
    pub fn classify(raw_reward: f64, terminated: bool) -> Self {
        if terminated && raw_reward >= 1.0 {
            TransitionKind::Success
        } else if terminated && raw_reward == 0.0 {
            TransitionKind::Failure
        } else {
            TransitionKind::Step
        }
    }
}

/// Fixed shaped rewards per transition kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardShaping {
    pub success_bonus: f64,
    pub failure_penalty: f64,
    pub step_cost: f64,
}

impl Default for RewardShaping {
    fn default() -> Self {
        Self {
            success_bonus: 1.5,
            failure_penalty: -0.2,
            step_cost: -0.001,
        }
    }
}

impl RewardShaping {
    pub fn shape(&self, kind: TransitionKind) -> f64 {
        match kind {
            TransitionKind::Success => self.success_bonus,
            TransitionKind::Failure => self.failure_penalty,
            TransitionKind::Step => self.step_cost,
        }
    }
}
