//! Environment port - the reset/step contract agents train against
//!
//! The trainer never looks inside an environment. It only resets it, feeds it
//! action indices and reads back [`Step`] values, so any stochastic simulator
//! (a local adapter, a remote gym, a scripted test double) can sit behind
//! this trait.

use crate::Result;

/// Result of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    /// Observation after the action was applied
    pub observation: O,
    /// Raw reward emitted by the environment
    pub reward: f64,
    /// The episode reached a terminal state
    pub terminated: bool,
    /// The episode was cut short (e.g. a time limit)
    pub truncated: bool,
}

impl<O> Step<O> {
    /// Whether the episode is over for either reason
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Environment trait with a fixed-size discrete action space
///
/// # Event Sequence
///
/// 1. `reset()` - starts an episode and returns the initial observation
/// 2. `step(action)` - repeated until the returned step `is_done()`
///
/// Calling `step` after the episode is over is allowed; what happens is up to
/// the implementation.
pub trait Environment {
    /// What the agent sees after each transition
    type Observation;

    /// Number of discrete actions; valid indices are `0..action_count()`
    fn action_count(&self) -> usize;

    /// Start a new episode.
    fn reset(&mut self) -> Self::Observation;

    /// Apply an action index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] when `action` is outside
    /// `0..action_count()`.
    fn step(&mut self, action: usize) -> Result<Step<Self::Observation>>;
}

/// Environment whose observations are flat state indices
///
/// This is what a tabular learner needs: the value table is sized
/// `state_count() x action_count()`.
pub trait DiscreteEnvironment: Environment<Observation = usize> {
    /// Number of distinct states; observations are in `0..state_count()`
    fn state_count(&self) -> usize;
}

/// Reject action indices outside the environment's action space.
pub(crate) fn check_action(action: usize, available: usize) -> Result<()> {
    if action < available {
        Ok(())
    } else {
        Err(crate::Error::InvalidAction { action, available })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_done() {
        let mut step = Step {
            observation: 0usize,
            reward: 0.0,
            terminated: false,
            truncated: false,
        };
        assert!(!step.is_done());
        step.truncated = true;
        assert!(step.is_done());
        step.truncated = false;
        step.terminated = true;
        assert!(step.is_done());
    }

    #[test]
    fn test_check_action_bounds() {
        assert!(check_action(3, 4).is_ok());
        assert!(matches!(
            check_action(4, 4),
            Err(crate::Error::InvalidAction {
                action: 4,
                available: 4
            })
        ));
    }
}
