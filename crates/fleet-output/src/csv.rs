//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `robot_snapshots.csv`
//! - `tick_summaries.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, RobotSnapshotRow, TickSummaryRow};

pub const SNAPSHOT_HEADERS: [&str; 8] =
    ["tick", "robot", "status", "node", "order", "from", "to", "progress"];
pub const SUMMARY_HEADERS: [&str; 8] = [
    "tick", "active_routes", "moved", "arrived", "completed", "assigned", "failed", "discarded",
];
pub const EVENT_HEADERS: [&str; 3] = ["time", "type", "detail"];

/// Writes fleet output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    events:    Writer<File>,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` (truncating old ones) and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("robot_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADERS)?;

        Ok(Self { snapshots, summaries, events })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.robot.clone(),
                row.status.to_owned(),
                row.node.clone(),
                row.order.clone(),
                row.from.clone(),
                row.to.clone(),
                format!("{:.3}", row.progress),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.active_routes.to_string(),
            row.moved.to_string(),
            row.arrived.to_string(),
            row.completed.to_string(),
            row.assigned.to_string(),
            row.failed.to_string(),
            row.discarded.to_string(),
        ])?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record([row.time.as_str(), row.kind, row.detail.as_str()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
