//! Observer implementations for training and evaluation runs
//!
//! Observers collect data during a run without coupling the trainer to any
//! output format.

use std::{collections::VecDeque, path::PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::report::{self, ROLLING_WINDOW},
    ports::{
        Observer,
        observer::{EpisodeReport, Mode, StepEvent},
    },
};

/// Progress bar observer - shows run progress and the success count
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    successes: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            successes: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize, mode: Mode) -> Result<()> {
        let label = match mode {
            Mode::Training => "training",
            Mode::Evaluation => "evaluating",
        };
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {label} (goals: {{msg}})"
                ))
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.successes = 0;
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        if report.success {
            self.successes += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(report.episode as u64 + 1);
            pb.set_message(self.successes.to_string());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.successes.to_string());
        }
        Ok(())
    }
}

/// Metrics observer - aggregates per-episode statistics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    episodes: usize,
    successes: usize,
    total_steps: usize,
    total_shaped_return: f64,
    updates: usize,
    lock_in_updates: usize,
    final_exploration_rate: Option<f64>,
    recent: VecDeque<bool>,
}

/// Summary of run metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub avg_episode_length: f64,
    pub avg_shaped_return: f64,
    /// Table updates performed (zero when evaluating)
    pub updates: usize,
    /// Updates that used the lock-in learning rate
    pub lock_in_updates: usize,
    /// Successes over the last [`ROLLING_WINDOW`] + 1 episodes
    pub recent_successes: usize,
    pub final_exploration_rate: Option<f64>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.successes as f64 / self.episodes as f64
        }
    }

    pub fn avg_episode_length(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes,
            successes: self.successes,
            success_rate: self.success_rate(),
            avg_episode_length: self.avg_episode_length(),
            avg_shaped_return: if self.episodes == 0 {
                0.0
            } else {
                self.total_shaped_return / self.episodes as f64
            },
            updates: self.updates,
            lock_in_updates: self.lock_in_updates,
            recent_successes: self.recent.iter().filter(|&&s| s).count(),
            final_exploration_rate: self.final_exploration_rate,
        }
    }
}

impl Observer for MetricsObserver {
    fn on_run_start(&mut self, _total_episodes: usize, _mode: Mode) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn on_step(&mut self, event: &StepEvent) -> Result<()> {
        if event.learning_rate.is_some() {
            self.updates += 1;
            if event.shaped_reward > 0.0 {
                self.lock_in_updates += 1;
            }
        }
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        self.episodes += 1;
        self.total_steps += report.steps;
        self.total_shaped_return += report.shaped_return;
        if report.success {
            self.successes += 1;
        }
        self.final_exploration_rate = Some(report.exploration_rate);

        self.recent.push_back(report.success);
        if self.recent.len() > ROLLING_WINDOW + 1 {
            self.recent.pop_front();
        }
        Ok(())
    }
}

/// History observer - writes the success history as CSV when the run ends
pub struct HistoryObserver {
    path: PathBuf,
    history: Vec<bool>,
}

impl HistoryObserver {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl Observer for HistoryObserver {
    fn on_run_start(&mut self, total_episodes: usize, _mode: Mode) -> Result<()> {
        self.history = Vec::with_capacity(total_episodes);
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        self.history.push(report.success);
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        report::export_history_csv(&self.path, &self.history)?;
        log::info!("wrote success history to {}", self.path.display());
        Ok(())
    }
}
