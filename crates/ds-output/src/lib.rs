//! `ds-output` — survey output writers.
//!
//! | Feature   | Backend | Files created                                |
//! |-----------|---------|----------------------------------------------|
//! | *(none)*  | CSV     | `probe_snapshots.csv`, `coverage.csv`        |
//! | `sqlite`  | SQLite  | `survey.db`                                  |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ds_sim::SimObserver`.  Rows are
//! written on snapshot ticks (`SimConfig::output_interval_ticks`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{CsvWriter, SimOutputObserver};
//!
//! let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new("./output"))?);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CoverageRow, ProbeSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
