//! Plain data row types written by output backends.

use fleet_dispatch::FleetStore;
use fleet_events::Event;
use fleet_sim::{RobotPosition, TickSummary};

/// One robot's state at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSnapshotRow {
    pub tick:     u64,
    pub robot:    String,
    pub status:   &'static str,
    /// Node the robot last arrived at.
    pub node:     String,
    /// Order the robot is carrying out; empty when it has no route.
    pub order:    String,
    pub from:     String,
    pub to:       String,
    pub progress: f64,
}

impl RobotSnapshotRow {
    /// One row per position, joined with the robot's node and route.
    pub fn collect(tick: u64, store: &FleetStore, positions: &[RobotPosition]) -> Vec<Self> {
        positions
            .iter()
            .map(|p| {
                let node = store
                    .robot(p.robot.as_str())
                    .map(|r| r.node.to_string())
                    .unwrap_or_default();
                let order = store
                    .route_for_robot(p.robot.as_str())
                    .map(|r| r.order.to_string())
                    .unwrap_or_default();
                Self {
                    tick,
                    robot: p.robot.to_string(),
                    status: p.status.as_str(),
                    node,
                    order,
                    from: p.from.to_string(),
                    to: p.to.to_string(),
                    progress: p.progress,
                }
            })
            .collect()
    }
}

/// Counters for one processed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub active_routes: u64,
    pub moved:         u64,
    pub arrived:       u64,
    pub completed:     u64,
    pub assigned:      u64,
    pub failed:        u64,
    pub discarded:     u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:          s.tick.0,
            active_routes: s.active_routes as u64,
            moved:         s.moved as u64,
            arrived:       s.arrived as u64,
            completed:     s.completed as u64,
            assigned:      s.assigned as u64,
            failed:        s.failed as u64,
            discarded:     s.discarded as u64,
        }
    }
}

/// One event-log entry with its detail flattened to JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub time:   String,
    pub kind:   &'static str,
    pub detail: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            time:   e.timestamp(),
            kind:   e.kind.as_str(),
            detail: serde_json::Value::Object(e.detail.clone()).to_string(),
        }
    }
}
