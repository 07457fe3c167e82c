//! Nearest-idle-robot assignment.

use tracing::{debug, info, warn};

use fleet_core::{NodeId, OrderStatus, RobotName, RobotStatus};
use fleet_graph::{Graph, GraphError, Path, Router};

use crate::{DispatchError, DispatchResult, FleetStore, Route};

/// A successful assignment: the reserved route plus its two legs' costs.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub route:         Route,
    /// Robot position → order source.
    pub pickup_cost:   f64,
    /// Order source → order target.
    pub delivery_cost: f64,
}

impl Assignment {
    pub fn total_cost(&self) -> f64 {
        self.pickup_cost + self.delivery_cost
    }
}

/// Matches orders to idle robots through a [`Router`].
///
/// # Type parameter
///
/// `R` is fixed at compile time (e.g. [`fleet_graph::DijkstraRouter`]), the
/// same way the tick engine is generic over it.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<R: Router> {
    pub router: R,
}

impl<R: Router> Dispatcher<R> {
    pub fn new(router: R) -> Self {
        Self { router }
    }

    /// Try to assign `order` to the nearest idle robot.
    ///
    /// Returns `Ok(None)` when no idle robot can reach the order's source;
    /// the order keeps its status.  On success the robot becomes
    /// `EXECUTING`, the order `IN_PROGRESS`, and the route is stored.
    ///
    /// Nothing is mutated unless the whole assignment succeeds.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownOrder`] if `order` is not in the store.
    /// - [`DispatchError::NotAssignable`] unless the order is NEW or FAILED.
    /// - [`DispatchError::Routing`] if source or target are not graph nodes
    ///   or the target is unreachable from the source.
    pub fn assign(
        &self,
        graph: &Graph,
        store: &mut FleetStore,
        order: &str,
    ) -> DispatchResult<Option<Assignment>> {
        let o = store.order(order)?;
        if !o.status.is_assignable() {
            return Err(DispatchError::NotAssignable { order: o.name.clone(), status: o.status });
        }
        let order_name = o.name.clone();
        let source     = o.source.clone();

        // Source → target first: if the order can never be delivered no
        // robot should be reserved for it.
        let delivery = self.router.route(graph, source.as_str(), o.target.as_str())?;

        let Some((robot, pickup)) = self.nearest_idle_robot(graph, store, &source)? else {
            debug!(order = %order_name, "no reachable idle robot");
            return Ok(None);
        };

        let mut path = pickup.nodes;
        path.extend(delivery.nodes.into_iter().skip(1));

        let route = Route::new(robot.clone(), order_name.clone(), path);
        store.insert_route(route.clone())?;
        store.robot_mut(robot.as_str())?.status = RobotStatus::Executing;
        store.order_mut(order_name.as_str())?.status = OrderStatus::InProgress;

        info!(
            order = %order_name,
            robot = %robot,
            pickup_cost = pickup.cost,
            delivery_cost = delivery.cost,
            "order assigned"
        );

        Ok(Some(Assignment {
            route,
            pickup_cost:   pickup.cost,
            delivery_cost: delivery.cost,
        }))
    }

    /// The idle robot with the cheapest path to `node`, and that path.
    ///
    /// Equal costs go to the lexicographically smallest name.  Robots that
    /// cannot reach `node` are skipped; so are robots parked on a node the
    /// graph does not know, with a warning.
    pub fn nearest_idle_robot(
        &self,
        graph: &Graph,
        store: &FleetStore,
        node:  &NodeId,
    ) -> DispatchResult<Option<(RobotName, Path)>> {
        let mut best: Option<(RobotName, Path)> = None;

        for robot in store.idle_robots() {
            let path = match self.router.route(graph, robot.node.as_str(), node.as_str()) {
                Ok(p) => p,
                Err(GraphError::NoPathFound { .. }) => continue,
                Err(GraphError::InvalidNode(n)) if n != *node => {
                    warn!(robot = %robot.name, node = %n, "idle robot is on an unknown node; skipping");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let better = match &best {
                None => true,
                Some((name, p)) => {
                    path.cost < p.cost || (path.cost == p.cost && robot.name < *name)
                }
            };
            if better {
                best = Some((robot.name.clone(), path));
            }
        }

        Ok(best)
    }
}
