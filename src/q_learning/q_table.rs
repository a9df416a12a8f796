//! Dense value table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Q-table mapping (state, action) pairs to action-value estimates
///
/// Stored row-major: one row of `actions` values per state. Every entry starts
/// at zero and only changes through [`ValueTable::td_update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValueTable")]
pub struct ValueTable {
    states: usize,
    actions: usize,
    values: Vec<f64>,
}

/// Wire form of [`ValueTable`], checked before it becomes one
#[derive(Deserialize)]
struct RawValueTable {
    states: usize,
    actions: usize,
    values: Vec<f64>,
}

impl TryFrom<RawValueTable> for ValueTable {
    type Error = String;

    fn try_from(raw: RawValueTable) -> std::result::Result<Self, Self::Error> {
        let expected = raw.states.checked_mul(raw.actions);
        if expected != Some(raw.values.len()) {
            return Err(format!(
                "value table of {} x {} holds {} values",
                raw.states,
                raw.actions,
                raw.values.len()
            ));
        }
        Ok(Self {
            states: raw.states,
            actions: raw.actions,
            values: raw.values,
        })
    }
}

impl ValueTable {
    /// Create a zeroed table of `states` x `actions`
    pub fn zeros(states: usize, actions: usize) -> Self {
        Self {
            states,
            actions,
            values: vec![0.0; states * actions],
        }
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    /// Check that the table fits an environment with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if either dimension differs.
    pub fn ensure_shape(&self, states: usize, actions: usize) -> Result<()> {
        if self.states == states && self.actions == actions {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                rows: self.states,
                columns: self.actions,
                expected_rows: states,
                expected_columns: actions,
            })
        }
    }

    /// Get Q-value for a state-action pair
    ///
    /// # Panics
    ///
    /// Panics if `state` or `action` is out of range.
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.row(state)[action]
    }

    /// All action values for a state
    ///
    /// # Panics
    ///
    /// Panics if `state` is out of range.
    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.actions;
        &self.values[start..start + self.actions]
    }

    /// Maximum action value in a state
    pub fn max_value(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action; ties go to the lowest action index
    pub fn greedy_action(&self, state: usize) -> usize {
        let mut best = 0;
        let row = self.row(state);
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// One-step TD update of a single entry toward `target`
    ///
    /// Q(s,a) ← Q(s,a) + α[target - Q(s,a)]
    pub fn td_update(&mut self, state: usize, action: usize, target: f64, learning_rate: f64) {
        let idx = state * self.actions + action;
        let current = self.values[idx];
        self.values[idx] = current + learning_rate * (target - current);
    }

    /// Fail fast on out-of-range states coming from an environment.
    pub(crate) fn check_state(&self, state: usize) -> Result<()> {
        if state < self.states {
            Ok(())
        } else {
            Err(Error::InvalidState {
                state,
                available: self.states,
            })
        }
    }

    /// Iterate over every `(state, action, value)` entry
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, &value)| (idx / self.actions, idx % self.actions, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_initialization() {
        let table = ValueTable::zeros(64, 4);
        assert_eq!(table.states(), 64);
        assert_eq!(table.actions(), 4);
        assert!(table.iter().all(|(_, _, v)| v == 0.0));
    }

    #[test]
    fn test_greedy_action_prefers_max() {
        let mut table = ValueTable::zeros(2, 4);
        table.td_update(1, 2, 1.0, 1.0);
        assert_eq!(table.greedy_action(1), 2);
        assert_eq!(table.max_value(1), 1.0);
    }

    #[test]
    fn test_greedy_action_ties_take_first_index() {
        let mut table = ValueTable::zeros(1, 4);
        assert_eq!(table.greedy_action(0), 0);

        table.td_update(0, 1, 0.5, 1.0);
        table.td_update(0, 3, 0.5, 1.0);
        assert_eq!(table.greedy_action(0), 1);
    }

    #[test]
    fn test_td_update_moves_toward_target() {
        let mut table = ValueTable::zeros(3, 4);
        table.td_update(2, 1, 2.0, 0.5);
        assert!((table.get(2, 1) - 1.0).abs() < 1e-12);
        table.td_update(2, 1, 2.0, 0.5);
        assert!((table.get(2, 1) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_td_update_touches_single_entry() {
        let mut table = ValueTable::zeros(3, 4);
        table.td_update(1, 3, -0.2, 0.7);
        for (state, action, value) in table.iter() {
            if (state, action) == (1, 3) {
                assert!(value < 0.0);
            } else {
                assert_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn test_ensure_shape() {
        let table = ValueTable::zeros(16, 4);
        assert!(table.ensure_shape(16, 4).is_ok());
        assert!(matches!(
            table.ensure_shape(64, 4),
            Err(Error::DimensionMismatch { rows: 16, .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_wrong_value_count() {
        let json = r#"{ "states": 64, "actions": 4, "values": [0.0, 0.0, 0.0] }"#;
        let result: std::result::Result<ValueTable, _> = serde_json::from_str(json);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("holds 3 values"), "{message}");

        let json = r#"{ "states": 1, "actions": 2, "values": [0.5, 1.0] }"#;
        let table: ValueTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.greedy_action(0), 1);
    }
}
