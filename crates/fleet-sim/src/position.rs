//! Interpolated robot positions for visualisation.

use serde::Serialize;

use fleet_core::{NodeId, RobotName, RobotStatus};
use fleet_dispatch::{Robot, Route};
use fleet_graph::Graph;

use crate::fleet::FALLBACK_EDGE_WEIGHT;

/// Where a robot is drawn: `progress` of the way from `from` to `to`.
///
/// A stationary robot has `from == to` and `progress == 1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotPosition {
    pub robot:    RobotName,
    pub status:   RobotStatus,
    pub from:     NodeId,
    pub to:       NodeId,
    pub progress: f64,
}

impl RobotPosition {
    pub fn stationary(robot: &Robot) -> Self {
        Self {
            robot:    robot.name.clone(),
            status:   robot.status,
            from:     robot.node.clone(),
            to:       robot.node.clone(),
            progress: 1.0,
        }
    }

    /// Position of `robot` given its active route (if any).
    pub fn of(robot: &Robot, route: Option<&Route>, graph: &Graph) -> Self {
        let Some(route) = route.filter(|r| r.is_traversing()) else {
            return Self::stationary(robot);
        };
        let (Some(from), Some(to)) = (route.current_node(), route.next_node()) else {
            return Self::stationary(robot);
        };
        let weight = graph
            .edge_weight(from.as_str(), to.as_str())
            .unwrap_or(FALLBACK_EDGE_WEIGHT);

        Self {
            robot:    robot.name.clone(),
            status:   robot.status,
            from:     from.clone(),
            to:       to.clone(),
            progress: route.edge_progress(weight),
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}
