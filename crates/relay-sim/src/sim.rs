//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use relay_agent::{Scout, ScoutRngs, Worker, WorkerOutcome};
use relay_core::{LinkThresholds, RelayParams, RouteId, Tick, WorkerId};
use relay_data::{DataLedger, PackageState};
use relay_mobility::{DroneMotion, MotionModel};
use relay_routing::{Route, RouteTable};
use relay_spatial::NodeSnapshot;
use tracing::{debug, info, warn};

use crate::{PackageEvent, ScoutingRound, SimObserver, SimResult, SimView, TickStats, WakeQueue};

/// The main simulation runner.
///
/// `Sim<M>` owns every drone, scout, worker, route and package, each in an
/// arena keyed by its id, and drives the four-phase tick loop described in
/// the crate docs.  Agents never hold references to each other; workers name
/// their route by `RouteId` and the table is looked up per step.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: MotionModel> {
    /// Run parameters, already validated.
    pub params: RelayParams,

    /// Link thresholds derived from `params`.
    pub thresholds: LinkThresholds,

    /// Drone field, motion model and motion RNG.
    pub motion: DroneMotion<M>,

    /// Drone positions as of the last move; every agent reads this.
    pub snapshot: NodeSnapshot,

    /// Scouts, indexed by `ScoutId`.
    pub scouts: Vec<Scout>,

    /// Per-scout RNG streams, separated for the split-borrow pattern.
    pub scout_rngs: ScoutRngs,

    /// Live workers.  Removed as soon as they reach a terminal phase.
    pub workers: BTreeMap<WorkerId, Worker>,

    /// Pending worker wake-ups, one per live worker.
    pub wake_queue: WakeQueue,

    /// Discovered routes.
    pub routes: RouteTable,

    /// Every data unit generated so far and the state of its packages.
    pub ledger: DataLedger,

    pub(crate) current_tick:    Tick,
    pub(crate) next_worker_id:  WorkerId,
    pub(crate) scouting_rounds: u64,
    pub(crate) finished:        bool,
}

impl<M: MotionModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `params.total_ticks` or until every package is resolved.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            drones = self.motion.field.len(),
            scouts = self.scouts.len(),
            data   = self.params.data_count,
            ticks  = self.params.total_ticks,
            "simulation start",
        );
        while self.current_tick < self.params.end_tick() && !self.finished {
            self.tick_once(observer)?;
        }
        observer.on_sim_end(self.current_tick);

        let counts = self.ledger.counts();
        info!(
            tick      = %self.current_tick,
            complete  = self.finished,
            delivered = counts.delivered,
            lost      = counts.lost,
            rounds    = self.scouting_rounds,
            routes    = self.routes.len(),
            "simulation end",
        );
        Ok(())
    }

    /// Run at most `n` ticks from the current position (ignores
    /// `total_ticks`, still stops once every package is resolved).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.finished {
                break;
            }
            self.tick_once(observer)?;
        }
        Ok(())
    }

    /// The tick that will be processed next.
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Every data unit exists and every package is delivered or lost.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Completed scouting rounds.
    pub fn scouting_rounds(&self) -> u64 {
        self.scouting_rounds
    }

    /// Read-only view of the current state.
    pub fn view(&self) -> SimView<'_> {
        let field = &self.motion.field;
        SimView {
            field,
            snapshot: &self.snapshot,
            scouts:   &self.scouts,
            workers:  &self.workers,
            routes:   &self.routes,
            ledger:   &self.ledger,
            start:    field.start(),
            end:      field.end(),
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now, observer)?;
        observer.on_tick_end(now, stats);
        if self.params.snapshot_interval_ticks > 0
            && now.is_period(self.params.snapshot_interval_ticks)
        {
            observer.on_snapshot(now, &self.view());
        }

        self.finished = self.ledger.data_count() >= self.params.data_count
            && self.ledger.all_resolved();
        self.current_tick = now + 1;
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickStats> {
        let mut stats = TickStats::default();

        // ── Phase 1: drone motion ─────────────────────────────────────────
        if now > Tick::ZERO && now.is_period(self.params.drone_move_period) {
            self.motion.step();
            self.snapshot = self.motion.snapshot();
            stats.drones_moved = true;
        }

        // ── Phase 2: data generation ──────────────────────────────────────
        if now.is_period(self.params.data_generate_period)
            && self.ledger.data_count() < self.params.data_count
        {
            self.generate_data(now, observer)?;
            stats.data_generated = true;
            stats.workers_stepped += self.create_workers(now, observer)?;
        }

        // ── Phase 3: scouting ─────────────────────────────────────────────
        stats.scouts_active = self.explore_scouts()?;
        if stats.scouts_active == 0 {
            self.finish_scouting_round(now, observer)?;
            stats.workers_stepped += self.create_workers(now, observer)?;
        }

        // ── Phase 4: due workers ──────────────────────────────────────────
        //
        // Drained in ascending WorkerId order, so link contention resolves
        // the same way on every run.
        if let Some(due) = self.wake_queue.drain_tick(now) {
            for worker in due {
                self.step_worker(worker, now, observer)?;
                stats.workers_stepped += 1;
            }
        }

        stats.workers_active = self.workers.len();
        stats.usable_routes = self.routes.usable_count();
        Ok(stats)
    }

    fn generate_data<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        let data = self.ledger.add_data(self.params.data_size);
        for package in self.ledger.data(data)?.packages() {
            observer.on_package_state(now, PackageEvent {
                data,
                package: package.id,
                state:   package.state(),
                worker:  None,
            });
        }
        debug!(%data, size = self.params.data_size, tick = %now, "data generated");
        Ok(())
    }

    /// Step every scout once.  Returns how many are still non-terminal.
    fn explore_scouts(&mut self) -> SimResult<usize> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let snapshot   = &self.snapshot;
        let thresholds = &self.thresholds;
        let scouts     = &mut self.scouts;
        let rngs       = &mut self.scout_rngs.inner;

        #[cfg(not(feature = "parallel"))]
        {
            for (scout, rng) in scouts.iter_mut().zip(rngs.iter_mut()) {
                scout.explore(snapshot, thresholds, rng)?;
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            scouts
                .par_iter_mut()
                .zip(rngs.par_iter_mut())
                .try_for_each(|(scout, rng)| scout.explore(snapshot, thresholds, rng).map(drop))?;
        }

        Ok(self.scouts.iter().filter(|s| !s.phase().is_terminal()).count())
    }

    /// Harvest every `Ended` scout into the route table and start a new round.
    fn finish_scouting_round<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        let mut ended = 0;
        let mut admitted = 0;
        for scout in &mut self.scouts {
            if let Some((hops, distances)) = scout.discovered_route() {
                ended += 1;
                if self.routes.try_add_route(hops, distances)?.is_admitted() {
                    admitted += 1;
                }
            }
            scout.reset(self.params.scout_energy_limit);
        }
        self.scouting_rounds += 1;

        let usable = self.routes.usable_count();
        info!(round = self.scouting_rounds, tick = %now, ended, admitted, usable, "scouting round complete");
        observer.on_scouting_round(now, ScoutingRound {
            round: self.scouting_rounds,
            ended,
            admitted,
        });
        observer.on_route_count(now, usable);
        Ok(())
    }

    /// Hand every unsent package to a new worker, round-robin over the
    /// routes usable right now.  Each worker takes its first step
    /// immediately.  Returns the number of workers created.
    fn create_workers<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        let pending = self.ledger.unsent_packages();
        if pending.is_empty() {
            return Ok(0);
        }
        let routes: Vec<RouteId> = self.routes.usable_routes().map(Route::id).collect();
        if routes.is_empty() {
            debug!(waiting = pending.len(), "no usable route for waiting packages");
            return Ok(0);
        }

        let created = pending.len();
        for ((data, package), route) in pending.into_iter().zip(routes.iter().cycle()) {
            self.ledger.package_mut(data, package)?.dispatch()?;

            let id = self.next_worker_id;
            self.next_worker_id = id.next();
            let worker = Worker::new(id, self.routes.route(*route)?, data, package, now);
            debug!(worker = %id, %route, %data, %package, "worker dispatched");
            observer.on_package_state(now, PackageEvent {
                data,
                package,
                state:  PackageState::InFlight,
                worker: Some(id),
            });

            self.workers.insert(id, worker);
            self.step_worker(id, now, observer)?;
        }
        Ok(created)
    }

    /// Step one worker and act on its outcome.
    fn step_worker<O: SimObserver>(&mut self, id: WorkerId, now: Tick, observer: &mut O) -> SimResult<()> {
        let Some(worker) = self.workers.get_mut(&id) else {
            return Ok(());
        };
        let route = self.routes.route_mut(worker.route_id())?;
        let outcome = worker.step(&self.snapshot, now, route, &self.thresholds)?;

        match outcome {
            WorkerOutcome::Continue => {
                self.wake_queue.push(worker.next_eligible_tick(), id);
                return Ok(());
            }
            WorkerOutcome::Contention => {
                self.wake_queue.push(now + 1, id);
                return Ok(());
            }
            _ => {}
        }

        // Terminal from here on: the worker leaves the arena.
        let Some(worker) = self.workers.remove(&id) else {
            return Ok(());
        };
        self.wake_queue.cancel(id);
        let (route, data, package) = (worker.route_id(), worker.data_id(), worker.package_id());

        // The usable-route count is reported only when a break retired a route.
        let (state, retired) = match outcome {
            WorkerOutcome::ForwardBreak => {
                self.routes.mark_unusable(route)?;
                self.ledger.package_mut(data, package)?.lose()?;
                warn!(worker = %id, %route, %data, %package, "package lost: forward link broke");
                (PackageState::Lost, true)
            }
            WorkerOutcome::ReturnBreak => {
                // The package already arrived; only the route is retired.
                self.routes.mark_unusable(route)?;
                self.ledger.package_mut(data, package)?.deliver()?;
                debug!(worker = %id, %route, "package delivered, return link broke");
                (PackageState::Delivered, true)
            }
            _ => {
                self.routes.refresh_distances(route, worker.confirmed_distances())?;
                self.ledger.package_mut(data, package)?.deliver()?;
                debug!(worker = %id, %route, "package delivered");
                (PackageState::Delivered, false)
            }
        };

        observer.on_package_state(now, PackageEvent { data, package, state, worker: Some(id) });
        if retired {
            observer.on_route_count(now, self.routes.usable_count());
        }
        Ok(())
    }
}
