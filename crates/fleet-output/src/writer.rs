//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, RobotSnapshotRow, TickSummaryRow};

/// Sink for fleet output rows.
///
/// Errors surface through [`SnapshotObserver::take_error`][crate::SnapshotObserver::take_error]
/// when the writer is driven by the tick loop.
pub trait OutputWriter {
    /// Write a batch of robot snapshots.
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write event-log entries, oldest first.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
