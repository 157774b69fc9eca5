//! The `MotionModel` trait and the two built-in models.

use relay_core::{DroneId, SimRng};

use crate::{Cell, DroneField};

/// How a single drone moves when the field is stepped.
///
/// Implementations receive the whole field read-only and return the drone's
/// next cell as signed coordinates; the field clamps them to its borders.
/// All randomness comes from the `rng` argument so runs replay exactly.
pub trait MotionModel: Send + Sync + 'static {
    fn next_cell(
        &self,
        drone: DroneId,
        from:  Cell,
        field: &DroneField,
        rng:   &mut SimRng,
    ) -> (i64, i64);
}

/// Each axis moves by an offset drawn uniformly from `{-1, 0, 1}`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomWalk;

impl MotionModel for RandomWalk {
    fn next_cell(
        &self,
        _drone: DroneId,
        from:   Cell,
        _field: &DroneField,
        rng:    &mut SimRng,
    ) -> (i64, i64) {
        let dx: i64 = rng.gen_range(-1..=1);
        let dy: i64 = rng.gen_range(-1..=1);
        (from.x as i64 + dx, from.y as i64 + dy)
    }
}

/// Drones never move.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stationary;

impl MotionModel for Stationary {
    fn next_cell(
        &self,
        _drone: DroneId,
        from:   Cell,
        _field: &DroneField,
        _rng:   &mut SimRng,
    ) -> (i64, i64) {
        (from.x as i64, from.y as i64)
    }
}
