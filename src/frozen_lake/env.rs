//! FrozenLake dynamics

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    frozen_lake::map::{LakeMap, Tile},
    grid::{Direction, Position},
    ports::{DiscreteEnvironment, Environment, Step, environment::check_action},
};

/// Episode step limit applied by Gymnasium's registration of `FrozenLake-v1`
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Lake actions in Gymnasium's index order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LakeAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl LakeAction {
    pub const ALL: [LakeAction; 4] = [
        LakeAction::Left,
        LakeAction::Down,
        LakeAction::Right,
        LakeAction::Up,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn direction(self) -> Direction {
        match self {
            LakeAction::Left => Direction::Left,
            LakeAction::Down => Direction::Down,
            LakeAction::Right => Direction::Right,
            LakeAction::Up => Direction::Up,
        }
    }

    /// The intended move and its two perpendicular neighbours
    fn slip_candidates(self) -> [LakeAction; 3] {
        let a = self as usize;
        [Self::ALL[(a + 3) % 4], self, Self::ALL[(a + 1) % 4]]
    }
}

/// Slippery FrozenLake
///
/// On slippery ice the agent moves in the intended direction or one of the
/// two perpendicular directions, each with probability 1/3. Moves into the
/// border leave it in place. Reaching `G` pays 1 and terminates; falling
/// into `H` pays 0 and terminates. After `max_steps` steps the episode is
/// truncated.
///
/// # Examples
///
/// ```
/// use gridlearn::ports::Environment;
/// use gridlearn::{FrozenLake, LakeMap};
///
/// let mut env = FrozenLake::new(LakeMap::default()).with_seed(7);
/// assert_eq!(env.reset(), 0);
/// let step = env.step(1)?;
/// assert!(step.observation < 64);
/// # Ok::<(), gridlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrozenLake {
    map: LakeMap,
    slippery: bool,
    max_steps: usize,
    position: Position,
    steps: usize,
    rng: StdRng,
}

impl FrozenLake {
    pub fn new(map: LakeMap) -> Self {
        Self {
            position: map.start(),
            map,
            slippery: true,
            max_steps: DEFAULT_MAX_STEPS,
            steps: 0,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_slippery(mut self, slippery: bool) -> Self {
        self.slippery = slippery;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn map(&self) -> &LakeMap {
        &self.map
    }

    pub fn position(&self) -> Position {
        self.position
    }

    fn state(&self) -> usize {
        self.position.index(self.map.cols())
    }
}

impl Environment for FrozenLake {
    type Observation = usize;

    fn action_count(&self) -> usize {
        LakeAction::ALL.len()
    }

    fn reset(&mut self) -> usize {
        self.position = self.map.start();
        self.steps = 0;
        self.state()
    }

    fn step(&mut self, action: usize) -> Result<Step<usize>> {
        check_action(action, self.action_count())?;
        let intended = LakeAction::ALL[action];

        let taken = if self.slippery {
            let candidates = intended.slip_candidates();
            candidates[self.rng.random_range(0..candidates.len())]
        } else {
            intended
        };

        self.position =
            self.position
                .step_clamped(taken.direction(), self.map.rows(), self.map.cols());
        self.steps += 1;

        let tile = self.map.tile(self.position);
        Ok(Step {
            observation: self.state(),
            reward: if tile == Tile::Goal { 1.0 } else { 0.0 },
            terminated: tile.is_terminal(),
            truncated: self.steps >= self.max_steps,
        })
    }
}

impl DiscreteEnvironment for FrozenLake {
    fn state_count(&self) -> usize {
        self.map.cell_count()
    }
}
