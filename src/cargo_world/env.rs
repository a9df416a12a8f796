//! Cargo world state machine

use ndarray::Array3;
use rand::{SeedableRng, rngs::StdRng, seq::index};

use crate::{
    Error, Result,
    cargo_world::{config::CargoConfig, entity::Cargo},
    grid::{Direction, Position},
    ports::{Environment, Step, environment::check_action},
};

/// Action order exposed through the environment port
pub const ACTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Where everything starts in an episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoLayout {
    pub robot: Position,
    pub time_limited: Position,
    pub goods: Vec<Position>,
    pub bads: Vec<Position>,
}

impl CargoLayout {
    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.robot)
            .chain(std::iter::once(self.time_limited))
            .chain(self.goods.iter().copied())
            .chain(self.bads.iter().copied())
    }
}

/// Outcome of one move
#[derive(Debug, Clone, PartialEq)]
pub struct CargoStep {
    pub observation: Array3<f32>,
    pub reward: f64,
    pub terminated: bool,
}

/// Square grid with a robot and cargo
///
/// # Examples
///
/// ```
/// use gridlearn::grid::Direction;
/// use gridlearn::{CargoConfig, CargoWorld};
///
/// let mut world = CargoWorld::new(CargoConfig::default().with_seed(3))?;
/// let observation = world.reset();
/// assert_eq!(observation.shape(), &[4, 8, 8]);
///
/// let step = world.step(Direction::Right);
/// assert!(!step.terminated);
/// assert_eq!(world.score(), step.reward);
/// # Ok::<(), gridlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CargoWorld {
    config: CargoConfig,
    robot: Position,
    time_limited: Cargo,
    goods: Vec<Cargo>,
    bads: Vec<Cargo>,
    steps: usize,
    score: f64,
    rng: StdRng,
}

impl CargoWorld {
    /// Build a world and place its first episode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate.
    pub fn new(config: CargoConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let origin = Position::new(0, 0);
        let mut world = Self {
            robot: origin,
            time_limited: Cargo::time_limited(origin, 0.0, config.time_limited_lifetime),
            goods: Vec::new(),
            bads: Vec::new(),
            steps: 0,
            score: 0.0,
            rng,
            config,
        };
        world.reset();
        Ok(world)
    }

    /// Start a new episode on randomly sampled, pairwise distinct cells.
    pub fn reset(&mut self) -> Array3<f32> {
        let size = self.config.map_size;
        let sampled = index::sample(&mut self.rng, size * size, self.config.entity_count());
        let mut cells = sampled.iter().map(|idx| Position::from_index(idx, size));

        let mut next = || cells.next().unwrap_or_default();
        let robot = next();
        let time_limited = next();
        let goods = (0..self.config.good_count).map(|_| next()).collect::<Vec<_>>();
        let bads = (0..self.config.bad_count).map(|_| next()).collect::<Vec<_>>();

        self.place(CargoLayout {
            robot,
            time_limited,
            goods,
            bads,
        });
        self.observation()
    }

    /// Start a new episode from a fixed layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if a position lies off the grid,
    /// two entities share a cell, or the cargo counts differ from the config.
    pub fn reset_with(&mut self, layout: CargoLayout) -> Result<Array3<f32>> {
        let size = self.config.map_size;
        let counts = (layout.goods.len(), layout.bads.len());
        if counts != (self.config.good_count, self.config.bad_count) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "layout has {} good and {} bad cargo, config expects {} and {}",
                    counts.0,
                    counts.1,
                    self.config.good_count,
                    self.config.bad_count
                ),
            });
        }
        let mut seen = Vec::new();
        for pos in layout.positions() {
            if pos.row >= size || pos.col >= size {
                return Err(Error::InvalidConfiguration {
                    message: format!("position {pos:?} is outside the {size}x{size} grid"),
                });
            }
            if seen.contains(&pos) {
                return Err(Error::InvalidConfiguration {
                    message: format!("more than one entity placed at {pos:?}"),
                });
            }
            seen.push(pos);
        }
        self.place(layout);
        Ok(self.observation())
    }

    fn place(&mut self, layout: CargoLayout) {
        let cfg = &self.config;
        self.robot = layout.robot;
        self.time_limited = Cargo::time_limited(
            layout.time_limited,
            cfg.time_limited_value,
            cfg.time_limited_lifetime,
        );
        self.goods = layout
            .goods
            .into_iter()
            .map(|pos| Cargo::good(pos, cfg.good_value))
            .collect();
        self.bads = layout
            .bads
            .into_iter()
            .map(|pos| Cargo::bad(pos, cfg.bad_value))
            .collect();
        self.steps = 0;
        self.score = 0.0;
    }

    /// Move the robot one cell.
    ///
    /// Order within a step: pay the step cost, move (or bounce off the border
    /// with the wall penalty), tick the time-limited cargo, then collect every
    /// active cargo under the robot.
    pub fn step(&mut self, direction: Direction) -> CargoStep {
        self.steps += 1;
        let size = self.config.map_size;
        let mut reward = self.config.step_cost;

        match self.robot.step(direction, size, size) {
            Some(next) => self.robot = next,
            None => reward += self.config.wall_penalty,
        }

        self.time_limited.tick();
        let robot = self.robot;
        for cargo in std::iter::once(&mut self.time_limited)
            .chain(self.goods.iter_mut())
            .chain(self.bads.iter_mut())
        {
            if cargo.is_active() && cargo.position() == robot {
                reward += cargo.collect();
            }
        }

        let mut terminated = false;
        if self.config.latch_completion && self.goods.iter().all(|cargo| !cargo.is_active()) {
            terminated = true;
            if !self.time_limited.is_active() {
                reward += self.config.completion_bonus;
            }
        }
        if self.steps >= self.config.max_steps {
            terminated = true;
        }

        self.score += reward;
        CargoStep {
            observation: self.observation(),
            reward,
            terminated,
        }
    }

    pub fn config(&self) -> &CargoConfig {
        &self.config
    }

    pub fn robot(&self) -> Position {
        self.robot
    }

    pub fn time_limited(&self) -> &Cargo {
        &self.time_limited
    }

    pub fn goods(&self) -> &[Cargo] {
        &self.goods
    }

    pub fn bads(&self) -> &[Cargo] {
        &self.bads
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Sum of rewards since the last reset
    pub fn score(&self) -> f64 {
        self.score
    }
}

impl Environment for CargoWorld {
    type Observation = Array3<f32>;

    fn action_count(&self) -> usize {
        ACTIONS.len()
    }

    fn reset(&mut self) -> Array3<f32> {
        CargoWorld::reset(self)
    }

    fn step(&mut self, action: usize) -> Result<Step<Array3<f32>>> {
        check_action(action, ACTIONS.len())?;
        let step = CargoWorld::step(self, ACTIONS[action]);
        Ok(Step {
            observation: step.observation,
            reward: step.reward,
            terminated: step.terminated,
            truncated: false,
        })
    }
}
