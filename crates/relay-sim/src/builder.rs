//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use relay_agent::{Scout, ScoutRngs};
use relay_core::{RelayParams, ScoutId, SimRng, Tick, WorkerId};
use relay_data::DataLedger;
use relay_mobility::{DroneField, DroneMotion, MotionModel};
use relay_routing::RouteTable;

use crate::{Sim, SimError, SimResult, WakeQueue};

/// RNG stream offsets derived from the root seed.
const PLACEMENT_STREAM: u64 = 1;
const MOTION_STREAM: u64 = 2;

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`RelayParams`] — validated in [`build`][Self::build]
/// - `M: MotionModel` — how drones drift (e.g. [`relay_mobility::RandomWalk`])
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                                           |
/// |--------------|---------------------------------------------------|
/// | `.field(f)`  | `drone_count` drones scattered uniformly at random |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(params, Stationary)
///     .field(field)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: MotionModel> {
    params: RelayParams,
    model:  M,
    field:  Option<DroneField>,
}

impl<M: MotionModel> SimBuilder<M> {
    pub fn new(params: RelayParams, model: M) -> Self {
        Self { params, model, field: None }
    }

    /// Supply explicit drone positions instead of random placement.
    ///
    /// The field must hold exactly `params.drone_count` drones.
    pub fn field(mut self, field: DroneField) -> Self {
        self.field = Some(field);
        self
    }

    /// Validate inputs, place drones and scouts, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        let params = self.params;
        params
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut root = SimRng::new(params.seed);
        let mut placement = root.child(PLACEMENT_STREAM);
        let motion_rng = root.child(MOTION_STREAM);

        let field = match self.field {
            Some(f) => {
                if f.len() != params.drone_count {
                    return Err(SimError::Config(format!(
                        "drone field holds {} drones but drone_count is {}",
                        f.len(),
                        params.drone_count,
                    )));
                }
                f
            }
            None => DroneField::random(
                params.drone_count,
                params.world_width,
                params.world_height,
                &mut placement,
            )?,
        };

        let (start, end) = (field.start(), field.end());
        let scouts = (0..params.scout_count)
            .map(|i| Scout::new(ScoutId(i as u32), start, end, params.scout_energy_limit))
            .collect();
        let scout_rngs = ScoutRngs::new(params.scout_count, params.seed);

        let motion = DroneMotion::new(self.model, field, motion_rng);
        let snapshot = motion.snapshot();
        let thresholds = params.thresholds();

        Ok(Sim {
            thresholds,
            snapshot,
            motion,
            scouts,
            scout_rngs,
            workers:         BTreeMap::new(),
            wake_queue:      WakeQueue::new(),
            routes:          RouteTable::new(thresholds),
            ledger:          DataLedger::new(),
            current_tick:    Tick::ZERO,
            next_worker_id:  WorkerId(0),
            scouting_rounds: 0,
            finished:        false,
            params,
        })
    }
}
