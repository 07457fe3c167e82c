//! The `FleetStore`: robots, orders and active routes.

use fleet_core::{OrderName, RobotName};

use crate::{DispatchError, DispatchResult, Order, Robot, Route};

#[cfg(not(feature = "fx-hash"))]
type SlotIndex<K> = std::collections::HashMap<K, usize>;
#[cfg(feature = "fx-hash")]
type SlotIndex<K> = rustc_hash::FxHashMap<K, usize>;

/// Mutable fleet state.
///
/// Robots and orders live in `Vec`s in insertion order (the order the tick
/// engine retries orders in) with a name → slot index beside each.  Entries
/// are never removed, so slots stay valid for the store's lifetime.  Routes
/// are a small `Vec` with at most one entry per robot.
#[derive(Debug, Default, Clone)]
pub struct FleetStore {
    robots:      Vec<Robot>,
    robot_index: SlotIndex<RobotName>,
    orders:      Vec<Order>,
    order_index: SlotIndex<OrderName>,
    routes:      Vec<Route>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Robots ────────────────────────────────────────────────────────────

    pub fn add_robot(&mut self, robot: Robot) -> DispatchResult<()> {
        if self.robot_index.contains_key(&robot.name) {
            return Err(DispatchError::DuplicateRobotName(robot.name));
        }
        self.robot_index.insert(robot.name.clone(), self.robots.len());
        self.robots.push(robot);
        Ok(())
    }

    pub fn robot(&self, name: &str) -> DispatchResult<&Robot> {
        self.robot_index
            .get(name)
            .map(|&i| &self.robots[i])
            .ok_or_else(|| DispatchError::UnknownRobot(name.into()))
    }

    pub fn robot_mut(&mut self, name: &str) -> DispatchResult<&mut Robot> {
        match self.robot_index.get(name) {
            Some(&i) => Ok(&mut self.robots[i]),
            None => Err(DispatchError::UnknownRobot(name.into())),
        }
    }

    /// All robots in roster order.
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn idle_robots(&self) -> impl Iterator<Item = &Robot> + '_ {
        self.robots.iter().filter(|r| r.is_idle())
    }

    // ── Orders ────────────────────────────────────────────────────────────

    pub fn add_order(&mut self, order: Order) -> DispatchResult<&Order> {
        if self.order_index.contains_key(&order.name) {
            return Err(DispatchError::DuplicateOrderName(order.name));
        }
        let slot = self.orders.len();
        self.order_index.insert(order.name.clone(), slot);
        self.orders.push(order);
        Ok(&self.orders[slot])
    }

    pub fn contains_order(&self, name: &str) -> bool {
        self.order_index.contains_key(name)
    }

    pub fn order(&self, name: &str) -> DispatchResult<&Order> {
        self.order_index
            .get(name)
            .map(|&i| &self.orders[i])
            .ok_or_else(|| DispatchError::UnknownOrder(name.into()))
    }

    pub fn order_mut(&mut self, name: &str) -> DispatchResult<&mut Order> {
        match self.order_index.get(name) {
            Some(&i) => Ok(&mut self.orders[i]),
            None => Err(DispatchError::UnknownOrder(name.into())),
        }
    }

    /// All orders in creation order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Names of NEW and FAILED orders, in creation order.
    pub fn assignable_orders(&self) -> Vec<OrderName> {
        self.orders
            .iter()
            .filter(|o| o.status.is_assignable())
            .map(|o| o.name.clone())
            .collect()
    }

    // ── Routes ────────────────────────────────────────────────────────────

    /// Store a route.  Fails if the robot already has one.
    pub fn insert_route(&mut self, route: Route) -> DispatchResult<()> {
        if self.route_for_robot(route.robot.as_str()).is_some() {
            return Err(DispatchError::RobotBusy(route.robot));
        }
        self.routes.push(route);
        Ok(())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route_for_robot(&self, robot: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.robot == robot)
    }

    pub fn route_for_order(&self, order: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.order == order)
    }

    /// Move every active route out of the store for stepping.
    ///
    /// Pair with [`restore_routes`](Self::restore_routes); robots and orders
    /// stay mutable while the routes are out.
    pub fn take_routes(&mut self) -> Vec<Route> {
        std::mem::take(&mut self.routes)
    }

    /// Put stepped routes back ahead of any inserted while they were out.
    pub fn restore_routes(&mut self, mut survivors: Vec<Route>) {
        survivors.append(&mut self.routes);
        self.routes = survivors;
    }
}
