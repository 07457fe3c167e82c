//! `SnapshotObserver<W>` — bridges `TickObserver` to an `OutputWriter`.

use fleet_core::Tick;
use fleet_dispatch::FleetStore;
use fleet_events::EventLog;
use fleet_sim::{RobotPosition, TickObserver, TickSummary};

use crate::row::{EventRow, RobotSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TickObserver`] that writes robot snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `TickObserver`
/// methods have no return value.  After `fleet.run_ticks()` returns, check
/// for errors with [`take_error`][Self::take_error].
pub struct SnapshotObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SnapshotObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Append every event in `log` to the writer and flush.
    ///
    /// Call once after the run; the observer hooks never see the log.
    pub fn write_event_log(&mut self, log: &EventLog) -> OutputResult<()> {
        let rows: Vec<EventRow> = log.iter().map(EventRow::from).collect();
        self.writer.write_events(&rows)?;
        self.writer.finish()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TickObserver for SnapshotObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, store: &FleetStore, positions: &[RobotPosition]) {
        let rows = RobotSnapshotRow::collect(tick.0, store, positions);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
