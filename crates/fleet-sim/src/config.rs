//! Engine-wide tunables.

use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

/// Tick engine configuration.  Every field has a default, so an empty
/// `[config]` table (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// A NEW order still unassigned this many ticks after creation is marked
    /// FAILED.  `None` disables expiry.
    pub order_timeout_ticks: Option<u64>,

    /// Call [`TickObserver::on_snapshot`][crate::TickObserver::on_snapshot]
    /// every this many ticks during `run_ticks`.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            order_timeout_ticks:     None,
            snapshot_interval_ticks: 1,
        }
    }
}

impl FleetConfig {
    pub fn with_order_timeout(mut self, ticks: u64) -> Self {
        self.order_timeout_ticks = Some(ticks);
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.order_timeout_ticks == Some(0) {
            return Err(SimError::Config(
                "order_timeout_ticks must be at least 1 (omit it to disable expiry)".into(),
            ));
        }
        Ok(())
    }

    /// `true` if a snapshot is due after processing `tick`.
    pub(crate) fn snapshot_due(&self, tick: u64) -> bool {
        self.snapshot_interval_ticks > 0 && tick.is_multiple_of(self.snapshot_interval_ticks)
    }
}
