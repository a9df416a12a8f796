//! Cargo world parameters

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for a [`CargoWorld`](crate::cargo_world::CargoWorld)
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoConfig {
    /// Side length of the square grid
    pub map_size: usize,
    pub good_count: usize,
    pub bad_count: usize,
    /// Cost charged on every step
    pub step_cost: f64,
    /// Extra cost for bumping into the border
    pub wall_penalty: f64,
    pub good_value: f64,
    pub bad_value: f64,
    pub time_limited_value: f64,
    /// Steps before the time-limited cargo expires
    pub time_limited_lifetime: u32,
    /// Episode length
    pub max_steps: usize,
    /// Paid when the episode ends with every positive cargo gone
    pub completion_bonus: f64,
    /// End the episode once all good cargo is collected. Off by default,
    /// in which case episodes only end at `max_steps` and the bonus is never
    /// paid.
    pub latch_completion: bool,
    /// Seed for cargo placement
    pub seed: Option<u64>,
}

impl Default for CargoConfig {
    fn default() -> Self {
        Self {
            map_size: 8,
            good_count: 3,
            bad_count: 2,
            step_cost: -1.0,
            wall_penalty: -5.0,
            good_value: 10.0,
            bad_value: -10.0,
            time_limited_value: 30.0,
            time_limited_lifetime: 20,
            max_steps: 100,
            completion_bonus: 20.0,
            latch_completion: false,
            seed: None,
        }
    }
}

impl CargoConfig {
    /// Robot plus every cargo, each on its own cell
    pub fn entity_count(&self) -> usize {
        2usize
            .saturating_add(self.good_count)
            .saturating_add(self.bad_count)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_latch_completion(mut self, latch: bool) -> Self {
        self.latch_completion = latch;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the grid cannot hold every
    /// entity on a distinct cell, or when the lifetime or episode length is
    /// zero.
    pub fn validate(&self) -> Result<()> {
        let Some(cells) = self.map_size.checked_mul(self.map_size) else {
            return Err(Error::InvalidConfiguration {
                message: format!("map_size {} is too large", self.map_size),
            });
        };
        if cells < self.entity_count() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "a {size}x{size} grid cannot hold {} entities",
                    self.entity_count(),
                    size = self.map_size
                ),
            });
        }
        if self.time_limited_lifetime == 0 {
            return Err(Error::InvalidConfiguration {
                message: "time_limited_lifetime must be positive".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}
