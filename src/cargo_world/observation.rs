//! Layered tensor view of the cargo world

use ndarray::Array3;

use crate::cargo_world::{entity::Cargo, env::CargoWorld};

pub const OBSERVATION_LAYERS: usize = 4;
/// One-hot robot position
pub const LAYER_ROBOT: usize = 0;
/// Time-limited cargo, valued at its remaining share of lifetime
pub const LAYER_TIME_LIMITED: usize = 1;
pub const LAYER_GOOD: usize = 2;
pub const LAYER_BAD: usize = 3;

impl CargoWorld {
    /// Observation of shape `(4, size, size)`.
    ///
    /// Inactive cargo leaves no mark.
    pub fn observation(&self) -> Array3<f32> {
        let size = self.config().map_size;
        let mut obs = Array3::<f32>::zeros((OBSERVATION_LAYERS, size, size));

        let robot = self.robot();
        obs[[LAYER_ROBOT, robot.row, robot.col]] = 1.0;

        let limited = self.time_limited();
        if limited.is_active() {
            let pos = limited.position();
            obs[[LAYER_TIME_LIMITED, pos.row, pos.col]] = limited.lifetime_fraction().unwrap_or(0.0);
        }

        mark(&mut obs, LAYER_GOOD, self.goods());
        mark(&mut obs, LAYER_BAD, self.bads());
        obs
    }
}

fn mark(obs: &mut Array3<f32>, layer: usize, cargo: &[Cargo]) {
    for item in cargo.iter().filter(|c| c.is_active()) {
        let pos = item.position();
        obs[[layer, pos.row, pos.col]] = 1.0;
    }
}
