//! `fleet-output` — CSV export for the agv_fleet engine.
//!
//! | File                  | Written by                          | One row per              |
//! |-----------------------|-------------------------------------|--------------------------|
//! | `robot_snapshots.csv` | `TickObserver::on_snapshot`         | robot per snapshot tick  |
//! | `tick_summaries.csv`  | `TickObserver::on_tick_end`         | processed tick           |
//! | `events.csv`          | [`SnapshotObserver::write_event_log`] | event-log entry        |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, SnapshotObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SnapshotObserver::new(writer);
//! fleet.run_ticks(20, &mut obs);
//! obs.write_event_log(fleet.event_log())?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotObserver;
pub use row::{EventRow, RobotSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
