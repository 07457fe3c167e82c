//! The `Fleet` facade and its tick engine.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, error, info, warn};

use fleet_core::{NodeId, OrderName, OrderStatus, RobotName, RobotStatus, Tick, TickClock};
use fleet_dispatch::{
    Assignment, DispatchError, DispatchResult, Dispatcher, FleetStore, Order, Robot, Route,
};
use fleet_events::{Event, EventKind, EventLog};
use fleet_graph::{Graph, Router};

use crate::{FleetConfig, RobotPosition, SimResult, TickObserver, TickSummary};

/// Weight used for a route edge the graph does not contain.
///
/// Routes are computed on the same immutable graph they are walked on, so
/// this only fires if a route was built by hand.
pub const FALLBACK_EDGE_WEIGHT: f64 = 1.0;

/// Result of stepping one route for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct StepOutcome {
    moved:     bool,
    arrived:   bool,
    completed: bool,
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// The engine: graph, fleet state, event log and clock behind one owner.
///
/// All mutation goes through `&mut self`; a transport layer that serves
/// concurrent requests wraps the `Fleet` in a mutex.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder] or
/// [`Scenario::build`][crate::Scenario::build].
#[derive(Debug)]
pub struct Fleet<R: Router> {
    pub(crate) config:     FleetConfig,
    pub(crate) clock:      TickClock,
    pub(crate) graph:      Graph,
    pub(crate) store:      FleetStore,
    pub(crate) events:     EventLog,
    pub(crate) dispatcher: Dispatcher<R>,
}

impl<R: Router> Fleet<R> {
    pub(crate) fn new(graph: Graph, router: R, config: FleetConfig, store: FleetStore) -> Self {
        Self {
            config,
            clock: TickClock::new(),
            graph,
            store,
            events: EventLog::new(),
            dispatcher: Dispatcher::new(router),
        }
    }

    // ── Read-only views ───────────────────────────────────────────────────

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// The tick the next call to [`advance`](Self::advance) will process.
    pub fn current_tick(&self) -> Tick {
        self.clock.current()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn store(&self) -> &FleetStore {
        &self.store
    }

    pub fn robots(&self) -> &[Robot] {
        self.store.robots()
    }

    pub fn orders(&self) -> &[Order] {
        self.store.orders()
    }

    pub fn routes(&self) -> &[Route] {
        self.store.routes()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    /// Events strictly newer than `since`, newest first, at most `limit`.
    ///
    /// `since` is an ISO-8601 timestamp; one without an offset is read as UTC.
    pub fn events(&self, since: Option<&str>, limit: Option<usize>) -> SimResult<Vec<&Event>> {
        Ok(self.events.query(since, limit)?)
    }

    /// Typed form of [`events`](Self::events).
    pub fn events_since(&self, since: Option<DateTime<Utc>>, limit: Option<usize>) -> Vec<&Event> {
        self.events.query_since(since, limit)
    }

    /// Interpolated position of every robot, in roster order.
    pub fn robot_positions(&self) -> Vec<RobotPosition> {
        self.store
            .robots()
            .iter()
            .map(|r| {
                RobotPosition::of(r, self.store.route_for_robot(r.name.as_str()), &self.graph)
            })
            .collect()
    }

    // ── Orders ────────────────────────────────────────────────────────────

    /// Validate and store a new order, then try to assign it immediately.
    ///
    /// Returns the order as stored after the assignment attempt, so its
    /// status is IN_PROGRESS if a robot was free and NEW otherwise.
    ///
    /// # Errors
    ///
    /// Nothing is stored on error.
    ///
    /// - [`GraphError::InvalidNode`][fleet_graph::GraphError::InvalidNode]
    ///   if `source` or `target` is not a graph node.
    /// - [`DispatchError::DuplicateOrderName`] if `name` is taken.
    /// - [`GraphError::NoPathFound`][fleet_graph::GraphError::NoPathFound]
    ///   if `target` cannot be reached from `source`.
    pub fn create_order(
        &mut self,
        name:   impl Into<OrderName>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> SimResult<Order> {
        let name   = name.into();
        let source = source.into();
        let target = target.into();

        self.graph.require(source.as_str())?;
        self.graph.require(target.as_str())?;
        if self.store.contains_order(name.as_str()) {
            return Err(DispatchError::DuplicateOrderName(name).into());
        }
        self.dispatcher.router.route(&self.graph, source.as_str(), target.as_str())?;

        let order = Order::new(name.clone(), source, target).created_at(self.clock.current());
        let order = self.store.add_order(order)?;
        self.events.append(
            EventKind::OrderCreated,
            json!({
                "order":  order.name.as_str(),
                "source": order.source.as_str(),
                "target": order.target.as_str(),
            }),
        );
        info!(order = %name, "order created");

        if let Err(e) = self.try_assign(&name) {
            warn!(order = %name, error = %e, "initial dispatch failed; will retry next tick");
        }

        Ok(self.store.order(name.as_str())?.clone())
    }

    /// Run the dispatcher for one order and log `order_assigned` on success.
    fn try_assign(&mut self, order: &OrderName) -> DispatchResult<Option<Assignment>> {
        let assignment = self.dispatcher.assign(&self.graph, &mut self.store, order.as_str())?;
        if let Some(a) = &assignment {
            let path: Vec<&str> = a.route.path.iter().map(NodeId::as_str).collect();
            self.events.append(
                EventKind::OrderAssigned,
                json!({
                    "order": a.route.order.as_str(),
                    "robot": a.route.robot.as_str(),
                    "path":  path,
                    "cost":  a.total_cost(),
                }),
            );
        }
        Ok(assignment)
    }

    // ── Tick engine ───────────────────────────────────────────────────────

    /// Process one tick.
    ///
    /// 1. Step every active route by one unit of edge weight.
    /// 2. Retry dispatch for NEW and FAILED orders in creation order.
    /// 3. Expire NEW orders past `order_timeout_ticks`.
    /// 4. Log `tick_processed` and advance the clock.
    pub fn advance(&mut self) -> TickSummary {
        let now = self.clock.current();
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Routes ────────────────────────────────────────────────────────
        //
        // Routes are moved out so each step can mutate robots and orders;
        // survivors go back in their original order.
        let routes = self.store.take_routes();
        let mut survivors = Vec::with_capacity(routes.len());
        let mut orphaned: Vec<OrderName> = Vec::new();
        for mut route in routes {
            match self.step_route(&mut route) {
                Ok(step) => {
                    summary.moved   += usize::from(step.moved);
                    summary.arrived += usize::from(step.arrived);
                    if step.completed {
                        summary.completed += 1;
                    } else {
                        survivors.push(route);
                    }
                }
                Err(e) => {
                    error!(
                        robot = %route.robot,
                        order = %route.order,
                        error = %e,
                        "route step failed; discarding route"
                    );
                    if let Ok(robot) = self.store.robot_mut(route.robot.as_str()) {
                        robot.status = RobotStatus::Idle;
                    }
                    summary.discarded += 1;
                    orphaned.push(route.order);
                }
            }
        }
        self.store.restore_routes(survivors);
        summary.failed += self.fail_orphaned_orders(&orphaned);

        // ── Dispatch retries ──────────────────────────────────────────────
        for order in self.store.assignable_orders() {
            if self.store.idle_robots().next().is_none() {
                break;
            }
            match self.try_assign(&order) {
                Ok(Some(_)) => summary.assigned += 1,
                Ok(None) => {}
                Err(e) => warn!(order = %order, error = %e, "dispatch failed; will retry next tick"),
            }
        }

        // ── Expiry ────────────────────────────────────────────────────────
        summary.failed += self.expire_orders(now);

        summary.active_routes = self.store.routes().len();
        self.events.append(
            EventKind::TickProcessed,
            json!({
                "tick":          now.0,
                "active_routes": summary.active_routes,
                "completed":     summary.completed,
                "assigned":      summary.assigned,
                "failed":        summary.failed,
            }),
        );
        debug!(
            tick = %now,
            active_routes = summary.active_routes,
            moved = summary.moved,
            completed = summary.completed,
            assigned = summary.assigned,
            "tick processed"
        );

        self.clock.advance();
        summary
    }

    /// Run `n` ticks, calling observer hooks around each one.
    pub fn run_ticks<O: TickObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.clock.current();
            observer.on_tick_start(now);
            let summary = self.advance();
            observer.on_tick_end(&summary);
            if self.config.snapshot_due(now.0) {
                let positions = self.robot_positions();
                observer.on_snapshot(now, &self.store, &positions);
            }
        }
        observer.on_run_end(self.clock.current());
    }

    /// Advance `route` by one tick.
    ///
    /// Fails only if the route's robot or order is missing from the store.
    fn step_route(&mut self, route: &mut Route) -> DispatchResult<StepOutcome> {
        self.store.robot(route.robot.as_str())?;
        self.store.order(route.order.as_str())?;

        let mut step = StepOutcome::default();

        // Start the next edge.
        if route.remaining_weight <= 0.0 && !route.is_complete() {
            route.remaining_weight = self.edge_weight_or_fallback(route);
        }

        if route.remaining_weight > 0.0 {
            route.remaining_weight = (route.remaining_weight - 1.0).max(0.0);
            step.moved = true;
            self.events.append(
                EventKind::RobotMoving,
                json!({
                    "robot":            route.robot.as_str(),
                    "order":            route.order.as_str(),
                    "from":             route.current_node().map(NodeId::as_str),
                    "to":               route.next_node().map(NodeId::as_str),
                    "remaining_weight": route.remaining_weight,
                }),
            );
        }

        if route.remaining_weight <= 0.0 && !route.is_complete() {
            route.next_index += 1;
            let node = route.path[route.next_index].clone();
            self.store.robot_mut(route.robot.as_str())?.node = node.clone();
            step.arrived = true;
            self.events.append(
                EventKind::RobotArrived,
                json!({
                    "robot": route.robot.as_str(),
                    "order": route.order.as_str(),
                    "node":  node.as_str(),
                }),
            );
        }

        if route.is_complete() {
            self.complete(route)?;
            step.completed = true;
        }

        Ok(step)
    }

    fn edge_weight_or_fallback(&self, route: &Route) -> f64 {
        let (Some(from), Some(to)) = (route.current_node(), route.next_node()) else {
            return FALLBACK_EDGE_WEIGHT;
        };
        match self.graph.edge_weight(from.as_str(), to.as_str()) {
            Some(w) => w,
            None => {
                warn!(
                    robot = %route.robot,
                    from = %from,
                    to = %to,
                    fallback = FALLBACK_EDGE_WEIGHT,
                    "route edge not in graph; using fallback weight"
                );
                FALLBACK_EDGE_WEIGHT
            }
        }
    }

    fn complete(&mut self, route: &Route) -> DispatchResult<()> {
        self.store.robot_mut(route.robot.as_str())?.status = RobotStatus::Idle;
        self.store.order_mut(route.order.as_str())?.status = OrderStatus::Done;

        let node = route.destination().map(NodeId::as_str);
        self.events.append(
            EventKind::OrderCompleted,
            json!({
                "robot": route.robot.as_str(),
                "order": route.order.as_str(),
                "node":  node,
            }),
        );
        info!(robot = %route.robot, order = %route.order, "order completed");
        Ok(())
    }

    /// Mark NEW orders that have waited `order_timeout_ticks` as FAILED.
    fn expire_orders(&mut self, now: Tick) -> usize {
        let Some(timeout) = self.config.order_timeout_ticks else {
            return 0;
        };

        let expired: Vec<(OrderName, u64)> = self
            .store
            .orders()
            .iter()
            .filter(|o| o.status == OrderStatus::New)
            .map(|o| (o.name.clone(), now.since(o.created_tick)))
            .filter(|&(_, waited)| waited >= timeout)
            .collect();

        for (name, waited) in &expired {
            if let Ok(order) = self.store.order_mut(name.as_str()) {
                order.status = OrderStatus::Failed;
            }
            self.events.append(
                EventKind::OrderFailed,
                json!({ "order": name.as_str(), "waited_ticks": waited }),
            );
            info!(order = %name, waited_ticks = waited, "order expired unassigned");
        }
        expired.len()
    }

    /// Move IN_PROGRESS orders left without a route to FAILED so dispatch
    /// picks them up again.
    fn fail_orphaned_orders(&mut self, orders: &[OrderName]) -> usize {
        let mut failed = 0;
        for name in orders {
            if self.store.route_for_order(name.as_str()).is_some() {
                continue;
            }
            let Ok(order) = self.store.order_mut(name.as_str()) else {
                continue;
            };
            if order.status != OrderStatus::InProgress {
                continue;
            }
            order.status = OrderStatus::Failed;
            failed += 1;
            self.events.append(
                EventKind::OrderFailed,
                json!({ "order": name.as_str(), "reason": "route_discarded" }),
            );
            warn!(order = %name, "order lost its route; marked failed for retry");
        }
        failed
    }

    /// Release a robot stuck in EXECUTING with no route.
    ///
    /// Robots seeded as EXECUTING are busy with external work; this is how
    /// that work is reported finished.
    pub fn release_robot(&mut self, robot: &str) -> SimResult<()> {
        if self.store.route_for_robot(robot).is_some() {
            return Err(DispatchError::RobotBusy(RobotName::from(robot)).into());
        }
        self.store.robot_mut(robot)?.status = RobotStatus::Idle;
        info!(robot, "robot released");
        Ok(())
    }
}
