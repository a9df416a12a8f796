//! Common test utilities for the gridlearn test suite.
//!
//! A scripted environment that replays fixed transitions, and an observer
//! that records every event it sees.

#![allow(dead_code)]

use gridlearn::{
    DiscreteEnvironment, Environment, Error, Mode, Observer, Result, Step,
    ports::{EpisodeReport, StepEvent},
};

/// One scripted episode: a start state and the transitions to replay
#[derive(Debug, Clone)]
pub struct Episode {
    pub start: usize,
    pub steps: Vec<Step<usize>>,
}

/// Replays scripted episodes in order, whatever the chosen action.
///
/// After the last episode the script starts over.
pub struct ScriptedEnv {
    states: usize,
    actions: usize,
    script: Vec<Episode>,
    episode: Option<usize>,
    cursor: usize,
    pub actions_taken: Vec<usize>,
}

impl ScriptedEnv {
    pub fn new(states: usize, actions: usize, script: Vec<Episode>) -> Self {
        assert!(!script.is_empty(), "script needs at least one episode");
        Self {
            states,
            actions,
            script,
            episode: None,
            cursor: 0,
            actions_taken: Vec::new(),
        }
    }
}

impl Environment for ScriptedEnv {
    type Observation = usize;

    fn action_count(&self) -> usize {
        self.actions
    }

    fn reset(&mut self) -> usize {
        let next = self.episode.map_or(0, |e| (e + 1) % self.script.len());
        self.episode = Some(next);
        self.cursor = 0;
        self.script[next].start
    }

    fn step(&mut self, action: usize) -> Result<Step<usize>> {
        if action >= self.actions {
            return Err(Error::InvalidAction {
                action,
                available: self.actions,
            });
        }
        self.actions_taken.push(action);
        let episode = &self.script[self.episode.unwrap_or(0)];
        let step = episode.steps[self.cursor.min(episode.steps.len() - 1)].clone();
        self.cursor += 1;
        Ok(step)
    }
}

impl DiscreteEnvironment for ScriptedEnv {
    fn state_count(&self) -> usize {
        self.states
    }
}

pub fn step(observation: usize, reward: f64, terminated: bool, truncated: bool) -> Step<usize> {
    Step {
        observation,
        reward,
        terminated,
        truncated,
    }
}

/// Observer events, flattened for easy assertions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStart(usize, Mode),
    EpisodeStart(usize),
    Step(StepEvent),
    EpisodeEnd(EpisodeReport),
    RunEnd,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn steps(&self) -> Vec<StepEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Step(step) => Some(step.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> Vec<EpisodeReport> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::EpisodeEnd(report) => Some(report.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Observer for Recorder {
    fn on_run_start(&mut self, total_episodes: usize, mode: Mode) -> Result<()> {
        self.events.push(Event::RunStart(total_episodes, mode));
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.events.push(Event::EpisodeStart(episode));
        Ok(())
    }

    fn on_step(&mut self, event: &StepEvent) -> Result<()> {
        self.events.push(Event::Step(event.clone()));
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        self.events.push(Event::EpisodeEnd(report.clone()));
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.events.push(Event::RunEnd);
        Ok(())
    }
}
