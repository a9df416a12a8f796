//! Decay schedules for the learning rate and the exploration rate

use serde::{Deserialize, Serialize};

/// Linear decay over a fraction of the run, floored at `min`
///
/// value(i) = max(min, start * (1 - i / (horizon_fraction * total)))
///
/// With the default horizon of 0.9 the value reaches `min` exactly at episode
/// `0.9 * total` and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearDecay {
    pub start: f64,
    pub min: f64,
    pub horizon_fraction: f64,
}

impl LinearDecay {
    pub fn new(start: f64, min: f64, horizon_fraction: f64) -> Self {
        Self {
            start,
            min,
            horizon_fraction,
        }
    }

    /// Value at episode `episode` of a run with `total` episodes
    pub fn value(&self, episode: usize, total: usize) -> f64 {
        let horizon = total as f64 * self.horizon_fraction;
        let progress = episode as f64 / horizon;
        (self.start * (1.0 - progress)).max(self.min)
    }
}

/// Multiplicative per-episode decay, floored at `min`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialDecay {
    pub start: f64,
    pub min: f64,
    pub rate: f64,
}

impl ExponentialDecay {
    pub fn new(start: f64, min: f64, rate: f64) -> Self {
        Self { start, min, rate }
    }

    /// Next value after one decay step from `current`
    pub fn next(&self, current: f64) -> f64 {
        (current * self.rate).max(self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_starts_at_start() {
        let lr = LinearDecay::new(0.7, 0.01, 0.9);
        assert!((lr.value(0, 15_000) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_linear_hits_min_at_horizon() {
        let lr = LinearDecay::new(0.7, 0.01, 0.9);
        assert_eq!(lr.value(9, 10), 0.01);
        assert_eq!(lr.value(13_500, 15_000), 0.01);
    }

    #[test]
    fn test_linear_never_below_min() {
        let lr = LinearDecay::new(0.7, 0.01, 0.9);
        let mut prev = f64::INFINITY;
        for episode in 0..1_000 {
            let value = lr.value(episode, 1_000);
            assert!(value >= 0.01);
            assert!(value <= prev);
            prev = value;
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let lr = LinearDecay::new(0.7, 0.01, 0.9);
        // halfway to the horizon: 0.7 * 0.5
        assert!((lr.value(450, 1_000) - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_exponential_monotone_and_floored() {
        let eps = ExponentialDecay::new(1.0, 0.01, 0.9995);
        let mut value = eps.start;
        for _ in 0..20_000 {
            let next = eps.next(value);
            assert!(next <= value);
            assert!(next >= eps.min);
            value = next;
        }
        assert_eq!(value, 0.01);
    }
}
