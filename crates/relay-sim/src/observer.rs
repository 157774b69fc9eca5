//! Simulation observer trait for progress reporting and data collection.

use std::collections::BTreeMap;

use relay_agent::{Scout, Worker};
use relay_core::{DataId, DroneId, PackageId, Tick, WorkerId};
use relay_data::{DataLedger, PackageState};
use relay_mobility::DroneField;
use relay_routing::RouteTable;
use relay_spatial::NodeSnapshot;

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// The drone field moved (and the snapshot was rebuilt) this tick.
    pub drones_moved:    bool,
    /// A new data unit was generated this tick.
    pub data_generated:  bool,
    /// Scouts still exploring after this tick's step.
    pub scouts_active:   usize,
    /// Worker steps taken this tick, including immediate first steps.
    pub workers_stepped: usize,
    /// Workers alive at the end of the tick.
    pub workers_active:  usize,
    /// Usable routes at the end of the tick.
    pub usable_routes:   usize,
}

/// A package changed state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PackageEvent {
    pub data:    DataId,
    pub package: PackageId,
    pub state:   PackageState,
    /// The worker carrying the package; `None` while it is still unsent.
    pub worker:  Option<WorkerId>,
}

/// Summary of a completed scouting round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoutingRound {
    /// 1-based round number.
    pub round:    u64,
    /// Scouts that came back with a confirmed path.
    pub ended:    usize,
    /// Paths the route table accepted.
    pub admitted: usize,
}

/// Read-only view of the whole simulation state, handed to
/// [`SimObserver::on_snapshot`].
pub struct SimView<'a> {
    pub field:    &'a DroneField,
    pub snapshot: &'a NodeSnapshot,
    pub scouts:   &'a [Scout],
    pub workers:  &'a BTreeMap<WorkerId, Worker>,
    pub routes:   &'a RouteTable,
    pub ledger:   &'a DataLedger,
    pub start:    DroneId,
    pub end:      DroneId,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — round printer
///
/// ```rust,ignore
/// struct RoundPrinter;
///
/// impl SimObserver for RoundPrinter {
///     fn on_scouting_round(&mut self, tick: Tick, round: ScoutingRound) {
///         println!("{tick}: round {} found {} paths", round.round, round.ended);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: TickStats) {}

    /// Called every `params.snapshot_interval_ticks` ticks, after the tick
    /// has been processed.
    fn on_snapshot(&mut self, _tick: Tick, _view: &SimView<'_>) {}

    /// Called whenever a package is created or changes state.
    fn on_package_state(&mut self, _tick: Tick, _event: PackageEvent) {}

    /// Called when every scout has finished and the round was harvested.
    fn on_scouting_round(&mut self, _tick: Tick, _round: ScoutingRound) {}

    /// Called with the usable route count after a scouting round and after a
    /// broken link retires a worker's route.
    fn on_route_count(&mut self, _tick: Tick, _usable: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
