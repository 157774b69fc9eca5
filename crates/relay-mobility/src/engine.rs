//! `DroneMotion` — steps a `DroneField` with a pluggable `MotionModel`.

use relay_core::{DroneId, SimRng};
use relay_spatial::NodeSnapshot;
use tracing::trace;

use crate::{DroneField, MotionModel};

/// Owns the drone field, the motion model and the motion RNG stream.
///
/// `M` is fixed at compile time; swap [`RandomWalk`][crate::RandomWalk] for
/// [`Stationary`][crate::Stationary] in tests that need a frozen topology.
pub struct DroneMotion<M: MotionModel> {
    pub model: M,
    pub field: DroneField,
    rng:       SimRng,
}

impl<M: MotionModel> DroneMotion<M> {
    pub fn new(model: M, field: DroneField, rng: SimRng) -> Self {
        Self { model, field, rng }
    }

    /// Move every drone once, in id order.
    ///
    /// Drones move sequentially against the field as it is being updated, so
    /// a model that looks at neighbours sees already-moved drones with lower
    /// ids.
    pub fn step(&mut self) {
        for i in 0..self.field.len() {
            let drone = DroneId(i as u32);
            let Some(from) = self.field.cell(drone) else { continue };
            let (x, y) = self.model.next_cell(drone, from, &self.field, &mut self.rng);
            let to = self.field.clamp(x, y);
            self.field.set_cell(drone, to);
        }
        trace!(drones = self.field.len(), "drones moved");
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        self.field.snapshot()
    }
}
