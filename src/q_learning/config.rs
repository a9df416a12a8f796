//! Hyperparameters for the Q-learning trainer.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{
        schedule::{ExponentialDecay, LinearDecay},
        shaping::RewardShaping,
    },
};

/// Configuration for a [`QLearningTrainer`](crate::q_learning::QLearningTrainer).
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name what it changes.
///
/// # Examples
///
/// ```
/// use gridlearn::q_learning::TrainerConfig;
///
/// let config = TrainerConfig::default()
///     .with_discount_factor(0.95)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), gridlearn::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Learning-rate schedule across the run
    pub learning_rate: LinearDecay,
    /// Rate used for an update whose shaped reward is positive
    pub lock_in_learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration-rate schedule, stepped once per episode
    pub exploration: ExponentialDecay,
    /// Shaped rewards per transition kind
    pub shaping: RewardShaping,
    /// Random seed for action selection
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: LinearDecay::new(0.7, 0.01, 0.9),
            lock_in_learning_rate: 0.9,
            discount_factor: 0.97,
            exploration: ExponentialDecay::new(1.0, 0.01, 0.9995),
            shaping: RewardShaping::default(),
            seed: None,
        }
    }
}

impl TrainerConfig {
    pub fn with_learning_rate(mut self, schedule: LinearDecay) -> Self {
        self.learning_rate = schedule;
        self
    }

    pub fn with_lock_in_learning_rate(mut self, rate: f64) -> Self {
        self.lock_in_learning_rate = rate;
        self
    }

    pub fn with_discount_factor(mut self, gamma: f64) -> Self {
        self.discount_factor = gamma;
        self
    }

    pub fn with_exploration(mut self, schedule: ExponentialDecay) -> Self {
        self.exploration = schedule;
        self
    }

    pub fn with_shaping(mut self, shaping: RewardShaping) -> Self {
        self.shaping = shaping;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every rate is a probability and every floor sits below
    /// its starting value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1] (got {value})"),
                })
            }
        };

        unit("learning_rate.start", self.learning_rate.start)?;
        unit("learning_rate.min", self.learning_rate.min)?;
        unit("lock_in_learning_rate", self.lock_in_learning_rate)?;
        unit("discount_factor", self.discount_factor)?;
        unit("exploration.start", self.exploration.start)?;
        unit("exploration.min", self.exploration.min)?;
        unit("exploration.rate", self.exploration.rate)?;

        if self.learning_rate.min > self.learning_rate.start {
            return Err(Error::InvalidConfiguration {
                message: "learning_rate.min exceeds learning_rate.start".to_string(),
            });
        }
        if self.exploration.min > self.exploration.start {
            return Err(Error::InvalidConfiguration {
                message: "exploration.min exceeds exploration.start".to_string(),
            });
        }
        let horizon = self.learning_rate.horizon_fraction;
        if horizon.is_nan() || horizon <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "learning_rate.horizon_fraction must be positive (got {horizon})"
                ),
            });
        }
        Ok(())
    }
}
