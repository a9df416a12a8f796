//! Success histories, rolling series and evaluation rounds

use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Look-back used for rolling success counts
pub const ROLLING_WINDOW: usize = 100;

/// Successes in the slice `[t - window, t]` for every episode `t`.
///
/// The slice is inclusive at both ends, so once enough history exists it
/// spans `window + 1` episodes. Early episodes use whatever precedes them.
pub fn rolling_success_counts(history: &[bool], window: usize) -> Vec<usize> {
    let mut counts = Vec::with_capacity(history.len());
    let mut running = 0;
    for (t, &success) in history.iter().enumerate() {
        running += usize::from(success);
        if t > window && history[t - window - 1] {
            running -= 1;
        }
        counts.push(running);
    }
    counts
}

/// Rolling counts divided by the length of each slice
pub fn rolling_success_rates(history: &[bool], window: usize) -> Vec<f64> {
    rolling_success_counts(history, window)
        .into_iter()
        .enumerate()
        .map(|(t, count)| count as f64 / (t.min(window) + 1) as f64)
        .collect()
}

/// Share of successful episodes, in percent; zero for an empty history
pub fn success_percentage(history: &[bool]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let successes = history.iter().filter(|&&s| s).count();
    successes as f64 / history.len() as f64 * 100.0
}

/// One row of an exported success history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub episode: usize,
    pub success: bool,
    pub rolling_successes: usize,
}

/// Rows of `(episode, success, rolling_successes)` over [`ROLLING_WINDOW`]
pub fn history_rows(history: &[bool]) -> Vec<HistoryRow> {
    rolling_success_counts(history, ROLLING_WINDOW)
        .into_iter()
        .zip(history)
        .enumerate()
        .map(|(episode, (rolling_successes, &success))| HistoryRow {
            episode,
            success,
            rolling_successes,
        })
        .collect()
}

/// Write a success history as CSV with a header row.
pub fn write_history_csv<W: Write>(writer: W, history: &[bool]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in history_rows(history) {
        csv.serialize(row)?;
    }
    csv.flush().map_err(|source| Error::Io {
        operation: "flush history CSV".to_string(),
        source,
    })?;
    Ok(())
}

/// [`write_history_csv`] into a new file at `path`.
pub fn export_history_csv<P: AsRef<Path>>(path: P, history: &[bool]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create file {path:?}"),
        source,
    })?;
    write_history_csv(file, history)
}

/// Collects success percentages across evaluation rounds
///
/// Rounds that could not run (for instance because no model was available)
/// are counted separately and do not drag the average down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationAccumulator {
    rounds: Vec<f64>,
    skipped: usize,
}

impl EvaluationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_round(&mut self, success_percentage: f64) {
        self.rounds.push(success_percentage);
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Percentages of the completed rounds, in order
    pub fn rounds(&self) -> &[f64] {
        &self.rounds
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Mean over completed rounds; `None` if none completed
    pub fn average(&self) -> Option<f64> {
        if self.rounds.is_empty() {
            None
        } else {
            Some(self.rounds.iter().sum::<f64>() / self.rounds.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(history: &[bool], window: usize) -> Vec<usize> {
        (0..history.len())
            .map(|t| {
                history[t.saturating_sub(window)..=t]
                    .iter()
                    .filter(|&&s| s)
                    .count()
            })
            .collect()
    }

    #[test]
    fn test_rolling_counts_match_inclusive_slices() {
        let history: Vec<bool> = (0..500).map(|i| i % 3 == 0 || i % 7 == 0).collect();
        assert_eq!(rolling_success_counts(&history, 100), naive(&history, 100));
        assert_eq!(rolling_success_counts(&history, 5), naive(&history, 5));
    }

    #[test]
    fn test_rolling_window_spans_window_plus_one() {
        let history = vec![true; 150];
        let counts = rolling_success_counts(&history, 100);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[99], 100);
        assert_eq!(counts[100], 101);
        assert_eq!(counts[149], 101);
    }

    #[test]
    fn test_rolling_rates() {
        let history = [true, false, true, true];
        let rates = rolling_success_rates(&history, 2);
        assert_eq!(rates, vec![1.0, 0.5, 2.0 / 3.0, 2.0 / 3.0]);
    }

    #[test]
    fn test_success_percentage() {
        assert_eq!(success_percentage(&[]), 0.0);
        assert_eq!(success_percentage(&[true, false, false, true]), 50.0);
    }

    #[test]
    fn test_history_csv() {
        let mut buffer = Vec::new();
        write_history_csv(&mut buffer, &[false, true, true]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "episode,success,rolling_successes",
                "0,false,0",
                "1,true,1",
                "2,true,2"
            ]
        );
    }

    #[test]
    fn test_accumulator_averages_completed_rounds() {
        let mut acc = EvaluationAccumulator::new();
        assert_eq!(acc.average(), None);

        acc.record_round(60.0);
        acc.record_skipped();
        acc.record_round(70.0);
        assert_eq!(acc.rounds(), &[60.0, 70.0]);
        assert_eq!(acc.skipped(), 1);
        assert_eq!(acc.average(), Some(65.0));
    }
}
