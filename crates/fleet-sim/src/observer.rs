//! Tick observer trait for progress reporting and data collection.

use serde::Serialize;

use fleet_core::Tick;
use fleet_dispatch::FleetStore;

use crate::RobotPosition;

/// What one call to [`Fleet::advance`][crate::Fleet::advance] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickSummary {
    pub tick:          Tick,
    /// Routes still active after the tick, including new assignments.
    pub active_routes: usize,
    /// Routes that consumed one unit of edge weight.
    pub moved:         usize,
    /// Robots that reached the next node on their path.
    pub arrived:       usize,
    pub completed:     usize,
    pub assigned:      usize,
    /// Orders moved to FAILED this tick, by expiry or a discarded route.
    pub failed:        usize,
    /// Routes dropped because their robot or order had vanished.
    pub discarded:     usize,
}

/// Callbacks invoked by [`Fleet::run_ticks`][crate::Fleet::run_ticks].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: completion counter
///
/// ```rust,ignore
/// struct Completions(usize);
///
/// impl TickObserver for Completions {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         self.0 += summary.completed;
///     }
/// }
/// ```
pub trait TickObserver {
    /// Called before the tick is processed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick is processed; the clock already points at the
    /// next tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// fleet state and the interpolated robot positions.
    fn on_snapshot(&mut self, _tick: Tick, _store: &FleetStore, _positions: &[RobotPosition]) {}

    /// Called once after the last tick of the run.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`TickObserver`] that does nothing.
pub struct NoopObserver;

impl TickObserver for NoopObserver {}
