//! `relay-output` — tabular logs and run summaries for the drone relay
//! simulator.
//!
//! The CSV backend creates six files in the output directory:
//!
//! | File                   | Columns                                                 |
//! |------------------------|---------------------------------------------------------|
//! | `drone_log.csv`        | tick, drone_id, pos_x, pos_y, is_start, is_end           |
//! | `scout_log.csv`        | tick, scout_id, drone_id, pos_x, pos_y, explore_phase    |
//! | `worker_log.csv`       | tick, worker_id, drone_id, pos_x, pos_y, sending_phase   |
//! | `data_state_log.csv`   | tick, data_id, package_id, state, worker_id              |
//! | `paths_count_log.csv`  | tick, paths_count                                        |
//! | `scouting_log.csv`     | tick, paths_count                                        |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `relay_sim::SimObserver` and also
//! accumulates a [`RunSummary`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use relay_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! println!("{}", obs.summary());
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DataStateRow, DroneRow, PathsCountRow, ScoutRow, ScoutingRow, WorkerRow};
pub use summary::{Lifetimes, RunSummary, SummaryBuilder};
pub use writer::OutputWriter;
