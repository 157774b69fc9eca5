//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use relay_core::Tick;
use relay_sim::{PackageEvent, ScoutingRound, SimObserver, SimView};
use tracing::error;

use crate::row::{DataStateRow, DroneRow, PathsCountRow, ScoutRow, ScoutingRow, WorkerRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, RunSummary, SummaryBuilder};

/// A [`SimObserver`] that writes the six tabular logs to any
/// [`OutputWriter`] backend and keeps a running [`RunSummary`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    summary:    SummaryBuilder,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            summary:    SummaryBuilder::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Statistics accumulated so far.
    pub fn summary(&self) -> RunSummary {
        self.summary.build()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                error!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, view: &SimView<'_>) {
        let t = tick.0;

        let drones: Vec<DroneRow> = view
            .field
            .iter()
            .map(|(id, cell)| DroneRow {
                tick:     t,
                drone_id: id.0,
                pos_x:    cell.x as f64,
                pos_y:    cell.y as f64,
                is_start: id == view.start,
                is_end:   id == view.end,
            })
            .collect();

        let scouts: Vec<ScoutRow> = view
            .scouts
            .iter()
            .filter_map(|s| {
                let node = s.current_node();
                let p = view.snapshot.position(node).ok()?;
                Some(ScoutRow {
                    tick:          t,
                    scout_id:      s.id.0,
                    drone_id:      node.0,
                    pos_x:         p.x,
                    pos_y:         p.y,
                    explore_phase: s.phase().code(),
                })
            })
            .collect();

        let workers: Vec<WorkerRow> = view
            .workers
            .values()
            .filter_map(|w| {
                let node = w.current_node();
                let p = view.snapshot.position(node).ok()?;
                Some(WorkerRow {
                    tick:          t,
                    worker_id:     w.id.0,
                    drone_id:      node.0,
                    pos_x:         p.x,
                    pos_y:         p.y,
                    sending_phase: w.phase().code(),
                })
            })
            .collect();

        let result = self.writer.write_drones(&drones);
        self.store_err(result);
        let result = self.writer.write_scouts(&scouts);
        self.store_err(result);
        if !workers.is_empty() {
            let result = self.writer.write_workers(&workers);
            self.store_err(result);
        }
    }

    fn on_package_state(&mut self, tick: Tick, event: PackageEvent) {
        self.summary.record_package(tick, &event);
        let row = DataStateRow {
            tick:       tick.0,
            data_id:    event.data.0,
            package_id: event.package.0,
            state:      event.state.code(),
            worker_id:  event.worker.map_or(-1, |w| w.0 as i64),
        };
        let result = self.writer.write_data_state(&row);
        self.store_err(result);
    }

    fn on_scouting_round(&mut self, tick: Tick, round: ScoutingRound) {
        self.summary.record_round(&round);
        let row = ScoutingRow { tick: tick.0, paths_count: round.ended as u64 };
        let result = self.writer.write_scouting(&row);
        self.store_err(result);
    }

    fn on_route_count(&mut self, tick: Tick, usable: usize) {
        let row = PathsCountRow { tick: tick.0, paths_count: usable as u64 };
        let result = self.writer.write_paths_count(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.summary.record_end(final_tick);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
