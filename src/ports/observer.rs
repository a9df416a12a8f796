//! Observer port - abstraction for watching training and evaluation runs
//!
//! This port lets progress bars, metrics and history exports listen to a run
//! without the trainer knowing about any of them.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Whether a run updates the value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Explore and update the table
    Training,
    /// Act greedily, leave the table untouched
    Evaluation,
}

impl Mode {
    pub fn is_training(self) -> bool {
        matches!(self, Mode::Training)
    }
}

/// One transition as seen by the trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    pub episode: usize,
    pub step: usize,
    pub state: usize,
    pub action: usize,
    pub next_state: usize,
    /// Reward reported by the environment
    pub raw_reward: f64,
    /// Reward the learner trained on
    pub shaped_reward: f64,
    /// Learning rate applied to this update; `None` when nothing was updated
    pub learning_rate: Option<f64>,
    pub terminated: bool,
    pub truncated: bool,
}

/// Summary of a finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub episode: usize,
    /// The goal was reached during the episode
    pub success: bool,
    pub steps: usize,
    /// Sum of shaped rewards
    pub shaped_return: f64,
    /// Exploration rate in effect during the episode; zero when evaluating
    pub exploration_rate: f64,
    /// Scheduled learning rate for the episode; `None` when evaluating
    pub learning_rate: Option<f64>,
}

/// Observer trait for monitoring runs
///
/// # Event Sequence
///
/// 1. `on_run_start(total_episodes, mode)` - once
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(event)` - for each transition
///    - `on_episode_end(report)`
/// 3. `on_run_end()` - once
///
/// Every method defaults to doing nothing.
pub trait Observer: Send {
    fn on_run_start(&mut self, _total_episodes: usize, _mode: Mode) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    fn on_step(&mut self, _event: &StepEvent) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _report: &EpisodeReport) -> Result<()> {
        Ok(())
    }

    /// Use this to finalize outputs, close files, or display summaries.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shared observers let the caller keep a handle and read results after the
/// trainer is done with them.
impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn on_run_start(&mut self, total_episodes: usize, mode: Mode) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_run_start(total_episodes, mode)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_episode_start(episode)
    }

    fn on_step(&mut self, event: &StepEvent) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_step(event)
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_episode_end(report)
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_run_end()
    }
}
