//! Cargo entities

use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// What a cargo is, and for time-limited cargo how long it has left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CargoKind {
    Good,
    Bad,
    TimeLimited { lifetime: u32, remaining: u32 },
}

/// A piece of cargo lying on the grid
///
/// Once collected or expired a cargo stays inactive until the world is reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    kind: CargoKind,
    position: Position,
    value: f64,
    active: bool,
}

impl Cargo {
    pub fn good(position: Position, value: f64) -> Self {
        Self::new(CargoKind::Good, position, value)
    }

    pub fn bad(position: Position, value: f64) -> Self {
        Self::new(CargoKind::Bad, position, value)
    }

    pub fn time_limited(position: Position, value: f64, lifetime: u32) -> Self {
        Self::new(
            CargoKind::TimeLimited {
                lifetime,
                remaining: lifetime,
            },
            position,
            value,
        )
    }

    fn new(kind: CargoKind, position: Position, value: f64) -> Self {
        Self {
            kind,
            position,
            value,
            active: true,
        }
    }

    pub fn kind(&self) -> CargoKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pick the cargo up: its value the first time, zero afterwards.
    pub fn collect(&mut self) -> f64 {
        if self.active {
            self.active = false;
            self.value
        } else {
            0.0
        }
    }

    /// Advance one step. Only time-limited cargo changes.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        if let CargoKind::TimeLimited { remaining, .. } = &mut self.kind {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.active = false;
                log::debug!("time-limited cargo at {:?} expired", self.position);
            }
        }
    }

    /// Remaining share of the lifetime, in `[0, 1]`; `None` for cargo that
    /// never expires.
    pub fn lifetime_fraction(&self) -> Option<f32> {
        match self.kind {
            CargoKind::TimeLimited {
                lifetime,
                remaining,
            } if lifetime > 0 => Some(remaining as f32 / lifetime as f32),
            CargoKind::TimeLimited { .. } => Some(0.0),
            CargoKind::Good | CargoKind::Bad => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_pays_once() {
        let mut cargo = Cargo::good(Position::new(1, 1), 10.0);
        assert_eq!(cargo.collect(), 10.0);
        assert!(!cargo.is_active());
        assert_eq!(cargo.collect(), 0.0);

        let mut cargo = Cargo::bad(Position::new(1, 1), -10.0);
        assert_eq!(cargo.collect(), -10.0);
        assert_eq!(cargo.collect(), 0.0);
    }

    #[test]
    fn test_tick_is_noop_for_plain_cargo() {
        let mut cargo = Cargo::good(Position::new(0, 0), 10.0);
        for _ in 0..100 {
            cargo.tick();
        }
        assert!(cargo.is_active());
        assert_eq!(cargo.lifetime_fraction(), None);
    }

    #[test]
    fn test_time_limited_counts_down_and_expires() {
        let mut cargo = Cargo::time_limited(Position::new(0, 0), 30.0, 4);
        assert_eq!(cargo.lifetime_fraction(), Some(1.0));

        for expected in [3, 2, 1] {
            cargo.tick();
            assert!(cargo.is_active());
            assert!(matches!(
                cargo.kind(),
                CargoKind::TimeLimited { remaining, .. } if remaining == expected
            ));
        }
        assert_eq!(cargo.lifetime_fraction(), Some(0.25));

        cargo.tick();
        assert!(!cargo.is_active());
        assert_eq!(cargo.collect(), 0.0);

        // stays expired and never goes below zero
        for _ in 0..5 {
            cargo.tick();
        }
        assert!(!cargo.is_active());
        assert!(matches!(
            cargo.kind(),
            CargoKind::TimeLimited { remaining: 0, .. }
        ));
    }

    #[test]
    fn test_collected_time_limited_stops_counting() {
        let mut cargo = Cargo::time_limited(Position::new(0, 0), 30.0, 5);
        cargo.tick();
        assert_eq!(cargo.collect(), 30.0);
        cargo.tick();
        assert!(matches!(
            cargo.kind(),
            CargoKind::TimeLimited { remaining: 4, .. }
        ));
    }
}
