//! The `OutputWriter` trait implemented by backend writers.

use crate::{DataStateRow, DroneRow, OutputResult, PathsCountRow, ScoutRow, ScoutingRow, WorkerRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write every drone's position for one snapshot.
    fn write_drones(&mut self, rows: &[DroneRow]) -> OutputResult<()>;

    /// Write every scout's location for one snapshot.
    fn write_scouts(&mut self, rows: &[ScoutRow]) -> OutputResult<()>;

    /// Write every live worker's location for one snapshot.
    fn write_workers(&mut self, rows: &[WorkerRow]) -> OutputResult<()>;

    fn write_data_state(&mut self, row: &DataStateRow) -> OutputResult<()>;

    fn write_paths_count(&mut self, row: &PathsCountRow) -> OutputResult<()>;

    fn write_scouting(&mut self, row: &ScoutingRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
