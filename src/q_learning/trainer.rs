//! Q-learning trainer for discrete environments
//!
//! Runs episodes against any [`DiscreteEnvironment`], choosing actions
//! ε-greedily from a dense [`ValueTable`] and updating it with shaped rewards.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::report,
    ports::{
        DiscreteEnvironment, Observer, Step,
        observer::{EpisodeReport, Mode, StepEvent},
    },
    q_learning::{
        config::TrainerConfig,
        q_table::ValueTable,
        shaping::TransitionKind,
    },
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// TD target for one transition.
///
/// Truncation is checked first and bootstraps exactly like a continuing step;
/// only a plain termination drops the future term.
pub fn td_target(reward: f64, next_max: f64, discount: f64, terminated: bool, truncated: bool) -> f64 {
    if truncated {
        reward + discount * next_max
    } else if terminated {
        reward
    } else {
        reward + discount * next_max
    }
}

/// Outcome of a call to [`QLearningTrainer::run`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: Mode,
    pub episodes: Vec<EpisodeReport>,
    /// Exploration rate after the last decay step; evaluation leaves it as is
    pub final_exploration_rate: f64,
}

impl RunSummary {
    /// Per-episode success flags, in episode order
    pub fn success_history(&self) -> Vec<bool> {
        self.episodes.iter().map(|e| e.success).collect()
    }

    pub fn successes(&self) -> usize {
        self.episodes.iter().filter(|e| e.success).count()
    }

    /// Share of successful episodes, in percent
    pub fn success_percentage(&self) -> f64 {
        report::success_percentage(&self.success_history())
    }
}

/// Tabular Q-learning trainer
///
/// Owns the value table between runs. A training run always starts from a
/// zeroed table sized from the environment; an evaluation run needs a table
/// supplied with [`QLearningTrainer::with_table`] (or left over from an
/// earlier training run) and never modifies it.
///
/// # Examples
///
/// ```
/// use gridlearn::{FrozenLake, LakeMap, Mode, QLearningTrainer, TrainerConfig};
///
/// let mut env = FrozenLake::new(LakeMap::default()).with_seed(1);
/// let mut trainer = QLearningTrainer::new(TrainerConfig::default().with_seed(2));
/// let summary = trainer.run(&mut env, 50, Mode::Training)?;
/// assert_eq!(summary.episodes.len(), 50);
/// assert!(trainer.table().is_some());
/// # Ok::<(), gridlearn::Error>(())
/// ```
pub struct QLearningTrainer {
    config: TrainerConfig,
    table: Option<ValueTable>,
    epsilon: f64,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
}

impl QLearningTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            epsilon: config.exploration.start,
            rng: build_rng(config.seed),
            config,
            table: None,
            observers: Vec::new(),
        }
    }

    /// Provide a previously trained table (required for evaluation)
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&ValueTable> {
        self.table.as_ref()
    }

    pub fn into_table(self) -> Option<ValueTable> {
        self.table
    }

    /// Current exploration rate
    pub fn exploration_rate(&self) -> f64 {
        self.epsilon
    }

    /// Run `episodes` episodes against `env`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEpisodeCount`] if `episodes` is zero
    /// - [`Error::InvalidConfiguration`] if the configuration is invalid
    /// - [`Error::MissingModel`] when evaluating without a table
    /// - [`Error::DimensionMismatch`] if the table does not fit `env`
    /// - any error surfaced by the environment or an observer
    pub fn run<E: DiscreteEnvironment>(
        &mut self,
        env: &mut E,
        episodes: usize,
        mode: Mode,
    ) -> Result<RunSummary> {
        if episodes == 0 {
            return Err(Error::InvalidEpisodeCount { count: episodes });
        }
        self.config.validate()?;

        let states = env.state_count();
        let actions = env.action_count();
        let mut table = match mode {
            Mode::Training => ValueTable::zeros(states, actions),
            Mode::Evaluation => self.table.take().ok_or(Error::MissingModel)?,
        };

        let outcome = table
            .ensure_shape(states, actions)
            .and_then(|()| self.run_episodes(env, &mut table, episodes, mode));
        self.table = Some(table);
        outcome
    }

    fn run_episodes<E: DiscreteEnvironment>(
        &mut self,
        env: &mut E,
        table: &mut ValueTable,
        episodes: usize,
        mode: Mode,
    ) -> Result<RunSummary> {
        if mode.is_training() {
            self.epsilon = self.config.exploration.start;
        }
        log::info!("starting {mode:?} run of {episodes} episodes");

        for observer in &mut self.observers {
            observer.on_run_start(episodes, mode)?;
        }

        let mut reports = Vec::with_capacity(episodes);
        for episode in 0..episodes {
            let report = self.play_episode(env, table, episode, episodes, mode)?;
            log::debug!(
                "episode {episode}: success={} steps={} epsilon={:.4} lr={:?}",
                report.success,
                report.steps,
                report.exploration_rate,
                report.learning_rate
            );

            for observer in &mut self.observers {
                observer.on_episode_end(&report)?;
            }
            reports.push(report);
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let summary = RunSummary {
            mode,
            episodes: reports,
            final_exploration_rate: self.epsilon,
        };
        log::info!(
            "{mode:?} run finished: {}/{} successful episodes",
            summary.successes(),
            episodes
        );
        Ok(summary)
    }

    fn play_episode<E: DiscreteEnvironment>(
        &mut self,
        env: &mut E,
        table: &mut ValueTable,
        episode: usize,
        episodes: usize,
        mode: Mode,
    ) -> Result<EpisodeReport> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let scheduled_lr = self.config.learning_rate.value(episode, episodes);
        let exploration_rate = if mode.is_training() { self.epsilon } else { 0.0 };

        let mut state = env.reset();
        table.check_state(state)?;

        let mut success = false;
        let mut steps = 0;
        let mut shaped_return = 0.0;

        loop {
            let action = self.select_action(table, state, mode);
            let step = env.step(action)?;
            table.check_state(step.observation)?;

            let kind = TransitionKind::classify(step.reward, step.terminated);
            let shaped = self.config.shaping.shape(kind);

            let learning_rate = if mode.is_training() {
                let lr = self.effective_learning_rate(scheduled_lr, shaped);
                self.update(table, state, action, shaped, &step, lr);
                Some(lr)
            } else {
                None
            };

            let event = StepEvent {
                episode,
                step: steps,
                state,
                action,
                next_state: step.observation,
                raw_reward: step.reward,
                shaped_reward: shaped,
                learning_rate,
                terminated: step.terminated,
                truncated: step.truncated,
            };
            for observer in &mut self.observers {
                observer.on_step(&event)?;
            }

            if step.reward >= 1.0 {
                success = true;
            }
            steps += 1;
            shaped_return += shaped;
            state = step.observation;

            if step.is_done() {
                break;
            }
        }

        if mode.is_training() {
            self.epsilon = self.config.exploration.next(self.epsilon);
        }

        Ok(EpisodeReport {
            episode,
            success,
            steps,
            shaped_return,
            exploration_rate,
            learning_rate: mode.is_training().then_some(scheduled_lr),
        })
    }

    /// ε-greedy during training, greedy during evaluation
    fn select_action(&mut self, table: &ValueTable, state: usize, mode: Mode) -> usize {
        if mode.is_training() && self.rng.random::<f64>() < self.epsilon {
            // Explore: uniform random action
            self.rng.random_range(0..table.actions())
        } else {
            table.greedy_action(state)
        }
    }

    /// A positive shaped reward overrides the schedule for that one update.
    fn effective_learning_rate(&self, scheduled: f64, shaped_reward: f64) -> f64 {
        if shaped_reward > 0.0 {
            self.config.lock_in_learning_rate
        } else {
            scheduled
        }
    }

    fn update(
        &self,
        table: &mut ValueTable,
        state: usize,
        action: usize,
        shaped_reward: f64,
        step: &Step<usize>,
        learning_rate: f64,
    ) {
        let target = td_target(
            shaped_reward,
            table.max_value(step.observation),
            self.config.discount_factor,
            step.terminated,
            step.truncated,
        );
        table.td_update(state, action, target, learning_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Environment, environment::check_action};

    /// Two-cell corridor: action 1 from cell 0 reaches the goal, action 0
    /// stays put. Truncates after `limit` steps.
    struct Corridor {
        position: usize,
        steps: usize,
        limit: usize,
    }

    impl Corridor {
        fn new(limit: usize) -> Self {
            Self {
                position: 0,
                steps: 0,
                limit,
            }
        }
    }

    impl Environment for Corridor {
        type Observation = usize;

        fn action_count(&self) -> usize {
            2
        }

        fn reset(&mut self) -> usize {
            self.position = 0;
            self.steps = 0;
            0
        }

        fn step(&mut self, action: usize) -> Result<Step<usize>> {
            check_action(action, 2)?;
            self.steps += 1;
            if action == 1 {
                self.position = 1;
            }
            let terminated = self.position == 1;
            Ok(Step {
                observation: self.position,
                reward: if terminated { 1.0 } else { 0.0 },
                terminated,
                truncated: !terminated && self.steps >= self.limit,
            })
        }
    }

    impl DiscreteEnvironment for Corridor {
        fn state_count(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_td_target_terminal_drops_future() {
        assert_eq!(td_target(1.5, 10.0, 0.97, true, false), 1.5);
    }

    #[test]
    fn test_td_target_truncation_bootstraps() {
        let continuing = td_target(-0.001, 2.0, 0.97, false, false);
        let truncated = td_target(-0.001, 2.0, 0.97, false, true);
        assert_eq!(continuing, truncated);
        // truncation wins even when both flags are set
        assert_eq!(td_target(-0.001, 2.0, 0.97, true, true), truncated);
    }

    #[test]
    fn test_zero_episodes_rejected() {
        let mut trainer = QLearningTrainer::new(TrainerConfig::default().with_seed(1));
        let mut env = Corridor::new(5);
        let result = trainer.run(&mut env, 0, Mode::Training);
        assert!(matches!(
            result,
            Err(Error::InvalidEpisodeCount { count: 0 })
        ));
        assert!(trainer.table().is_none());
    }

    #[test]
    fn test_evaluation_without_table_fails() {
        let mut trainer = QLearningTrainer::new(TrainerConfig::default());
        let mut env = Corridor::new(5);
        let result = trainer.run(&mut env, 3, Mode::Evaluation);
        assert!(matches!(result, Err(Error::MissingModel)));
    }

    #[test]
    fn test_evaluation_rejects_wrong_shape() {
        let mut trainer =
            QLearningTrainer::new(TrainerConfig::default()).with_table(ValueTable::zeros(5, 2));
        let mut env = Corridor::new(5);
        let result = trainer.run(&mut env, 1, Mode::Evaluation);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
        // the table is handed back even on failure
        assert!(trainer.table().is_some());
    }

    #[test]
    fn test_greedy_success_uses_lock_in_rate() {
        // with ε = 0 the zeroed table picks action 0 first, which costs a
        // step and hands the lead to action 1
        let config = TrainerConfig::default()
            .with_exploration(crate::q_learning::ExponentialDecay::new(0.0, 0.0, 1.0))
            .with_seed(3);
        let mut trainer = QLearningTrainer::new(config);
        let mut env = Corridor::new(3);

        let summary = trainer.run(&mut env, 1, Mode::Training).unwrap();
        let table = trainer.table().unwrap();

        assert!(summary.episodes[0].success);
        assert_eq!(summary.episodes[0].steps, 2);
        // 0.7 * (-0.001 + 0.97 * 0)
        assert!((table.get(0, 0) + 0.0007).abs() < 1e-12);
        // lock-in rate: 0.9 * (1.5 - 0)
        assert!((table.get(0, 1) - 1.35).abs() < 1e-12);
        // the goal row is never updated
        assert_eq!(table.row(1), &[0.0, 0.0]);
    }

    #[test]
    fn test_evaluation_leaves_table_untouched() {
        let mut trained = ValueTable::zeros(2, 2);
        trained.td_update(0, 1, 1.0, 1.0);
        let mut trainer = QLearningTrainer::new(TrainerConfig::default()).with_table(trained.clone());
        let mut env = Corridor::new(5);

        let summary = trainer.run(&mut env, 10, Mode::Evaluation).unwrap();
        assert_eq!(summary.successes(), 10);
        assert_eq!(summary.success_percentage(), 100.0);
        assert_eq!(trainer.table(), Some(&trained));
    }

    #[test]
    fn test_exploration_decays_per_episode() {
        let mut trainer = QLearningTrainer::new(TrainerConfig::default().with_seed(9));
        let mut env = Corridor::new(4);
        let summary = trainer.run(&mut env, 100, Mode::Training).unwrap();

        let mut prev = f64::INFINITY;
        for report in &summary.episodes {
            assert!(report.exploration_rate <= prev);
            assert!(report.exploration_rate >= 0.01);
            prev = report.exploration_rate;
        }
        let expected = 0.9995_f64.powi(100);
        assert!((summary.final_exploration_rate - expected).abs() < 1e-12);
        assert_eq!(trainer.exploration_rate(), summary.final_exploration_rate);
    }

    #[test]
    fn test_evaluation_keeps_exploration_rate() {
        let mut trainer = QLearningTrainer::new(TrainerConfig::default().with_seed(2));
        let mut env = Corridor::new(4);
        let trained = trainer.run(&mut env, 20, Mode::Training).unwrap();
        assert!(trained.episodes.iter().all(|r| r.learning_rate.is_some()));

        let evaluated = trainer.run(&mut env, 5, Mode::Evaluation).unwrap();
        assert_eq!(evaluated.final_exploration_rate, trained.final_exploration_rate);
        assert_eq!(trainer.exploration_rate(), trained.final_exploration_rate);
        for report in &evaluated.episodes {
            assert_eq!(report.exploration_rate, 0.0);
            assert_eq!(report.learning_rate, None);
        }
    }
}
