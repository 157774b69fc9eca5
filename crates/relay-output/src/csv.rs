//! CSV output backend.
//!
//! Creates the output directory if needed, then one file per log with its
//! header row.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DataStateRow, DroneRow, OutputResult, PathsCountRow, ScoutRow, ScoutingRow, WorkerRow};

pub const DRONE_LOG: &str = "drone_log.csv";
pub const SCOUT_LOG: &str = "scout_log.csv";
pub const WORKER_LOG: &str = "worker_log.csv";
pub const DATA_STATE_LOG: &str = "data_state_log.csv";
pub const PATHS_COUNT_LOG: &str = "paths_count_log.csv";
pub const SCOUTING_LOG: &str = "scouting_log.csv";

/// Writes simulation output to six CSV files.
pub struct CsvWriter {
    drones:      Writer<File>,
    scouts:      Writer<File>,
    workers:     Writer<File>,
    data_state:  Writer<File>,
    paths_count: Writer<File>,
    scouting:    Writer<File>,
    finished:    bool,
}

fn open(dir: &Path, name: &str, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(dir.join(name))?;
    w.write_record(header)?;
    Ok(w)
}

impl CsvWriter {
    /// Open (or create) the six CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            drones:      open(dir, DRONE_LOG, &["tick", "drone_id", "pos_x", "pos_y", "is_start", "is_end"])?,
            scouts:      open(dir, SCOUT_LOG, &["tick", "scout_id", "drone_id", "pos_x", "pos_y", "explore_phase"])?,
            workers:     open(dir, WORKER_LOG, &["tick", "worker_id", "drone_id", "pos_x", "pos_y", "sending_phase"])?,
            data_state:  open(dir, DATA_STATE_LOG, &["tick", "data_id", "package_id", "state", "worker_id"])?,
            paths_count: open(dir, PATHS_COUNT_LOG, &["tick", "paths_count"])?,
            scouting:    open(dir, SCOUTING_LOG, &["tick", "paths_count"])?,
            finished:    false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_drones(&mut self, rows: &[DroneRow]) -> OutputResult<()> {
        for row in rows {
            self.drones.write_record(&[
                row.tick.to_string(),
                row.drone_id.to_string(),
                row.pos_x.to_string(),
                row.pos_y.to_string(),
                (row.is_start as u8).to_string(),
                (row.is_end as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_scouts(&mut self, rows: &[ScoutRow]) -> OutputResult<()> {
        for row in rows {
            self.scouts.write_record(&[
                row.tick.to_string(),
                row.scout_id.to_string(),
                row.drone_id.to_string(),
                row.pos_x.to_string(),
                row.pos_y.to_string(),
                row.explore_phase.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_workers(&mut self, rows: &[WorkerRow]) -> OutputResult<()> {
        for row in rows {
            self.workers.write_record(&[
                row.tick.to_string(),
                row.worker_id.to_string(),
                row.drone_id.to_string(),
                row.pos_x.to_string(),
                row.pos_y.to_string(),
                row.sending_phase.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_data_state(&mut self, row: &DataStateRow) -> OutputResult<()> {
        self.data_state.write_record(&[
            row.tick.to_string(),
            row.data_id.to_string(),
            row.package_id.to_string(),
            row.state.to_string(),
            row.worker_id.to_string(),
        ])?;
        Ok(())
    }

    fn write_paths_count(&mut self, row: &PathsCountRow) -> OutputResult<()> {
        self.paths_count
            .write_record(&[row.tick.to_string(), row.paths_count.to_string()])?;
        Ok(())
    }

    fn write_scouting(&mut self, row: &ScoutingRow) -> OutputResult<()> {
        self.scouting
            .write_record(&[row.tick.to_string(), row.paths_count.to_string()])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.drones.flush()?;
        self.scouts.flush()?;
        self.workers.flush()?;
        self.data_state.flush()?;
        self.paths_count.flush()?;
        self.scouting.flush()?;
        Ok(())
    }
}
