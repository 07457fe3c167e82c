//! Robots, orders and the routes that bind them.

use fleet_core::{NodeId, OrderName, OrderStatus, RobotName, RobotStatus, Tick};

// ── Robot ─────────────────────────────────────────────────────────────────────

/// A vehicle on the graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub name:   RobotName,
    pub status: RobotStatus,
    /// The node the robot is at, or last arrived at while on a route.
    pub node:   NodeId,
}

impl Robot {
    /// An idle robot parked at `node`.
    pub fn idle(name: impl Into<RobotName>, node: impl Into<NodeId>) -> Self {
        Self { name: name.into(), status: RobotStatus::Idle, node: node.into() }
    }

    pub fn with_status(mut self, status: RobotStatus) -> Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.status == RobotStatus::Idle
    }
}

// ── Order ─────────────────────────────────────────────────────────────────────

/// A request to carry something from `source` to `target`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub name:         OrderName,
    pub source:       NodeId,
    pub target:       NodeId,
    pub status:       OrderStatus,
    /// Tick at which the order entered the store.
    pub created_tick: Tick,
}

impl Order {
    pub fn new(
        name:   impl Into<OrderName>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            name:         name.into(),
            source:       source.into(),
            target:       target.into(),
            status:       OrderStatus::New,
            created_tick: Tick::ZERO,
        }
    }

    pub fn created_at(mut self, tick: Tick) -> Self {
        self.created_tick = tick;
        self
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A committed path binding one robot to one order.
///
/// `path[0]` is where the robot stood when the order was assigned and the
/// last node is the order's target.  `next_index` points at the node the
/// robot last arrived at; while `remaining_weight > 0` the robot is on the
/// edge `path[next_index] → path[next_index + 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub robot:            RobotName,
    pub order:            OrderName,
    pub path:             Vec<NodeId>,
    pub next_index:       usize,
    /// Weight left on the current edge.  Never negative.
    pub remaining_weight: f64,
}

impl Route {
    pub fn new(robot: RobotName, order: OrderName, path: Vec<NodeId>) -> Self {
        debug_assert!(!path.is_empty(), "route path must contain at least one node");
        Self { robot, order, path, next_index: 0, remaining_weight: 0.0 }
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `true` once the cursor sits on the final node.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.next_index >= self.last_index()
    }

    /// `true` while part of the current edge is still untravelled.
    #[inline]
    pub fn is_traversing(&self) -> bool {
        self.remaining_weight > 0.0
    }

    /// The node the robot last arrived at.
    pub fn current_node(&self) -> Option<&NodeId> {
        self.path.get(self.next_index)
    }

    /// The node at the far end of the current edge, if any remain.
    pub fn next_node(&self) -> Option<&NodeId> {
        self.path.get(self.next_index + 1)
    }

    pub fn destination(&self) -> Option<&NodeId> {
        self.path.last()
    }

    /// Fraction of the current edge already travelled, in `[0.0, 1.0]`.
    ///
    /// `1 − remaining_weight / edge_weight`; a zero-weight edge counts as
    /// fully travelled.
    pub fn edge_progress(&self, edge_weight: f64) -> f64 {
        if edge_weight <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining_weight / edge_weight).clamp(0.0, 1.0)
    }
}
