//! Fluent builder for constructing a [`Fleet`].

use fleet_core::{NodeId, OrderName};
use fleet_dispatch::{FleetStore, Robot};
use fleet_graph::{Graph, GraphError, Router};

use crate::{Fleet, FleetConfig, SimResult};

/// Fluent builder for [`Fleet<R>`].
///
/// # Required inputs
///
/// - [`Graph`]: the immutable node graph
/// - `R: Router`: the routing algorithm (e.g. [`fleet_graph::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                  |
/// |-----------------|--------------------------|
/// | `.config(c)`    | `FleetConfig::default()` |
/// | `.robot(r)`     | no robots                |
/// | `.order(..)`    | no orders                |
///
/// Initial orders go through [`Fleet::create_order`] in the order given, so
/// they are validated, logged and dispatched exactly like later ones.
///
/// # Example
///
/// ```rust,ignore
/// let mut fleet = FleetBuilder::new(graph, DijkstraRouter)
///     .robot(Robot::idle("R1", "A"))
///     .order("O-1", "B", "D")
///     .build()?;
/// fleet.advance();
/// ```
pub struct FleetBuilder<R: Router> {
    graph:  Graph,
    router: R,
    config: FleetConfig,
    robots: Vec<Robot>,
    orders: Vec<(OrderName, NodeId, NodeId)>,
}

impl<R: Router> FleetBuilder<R> {
    pub fn new(graph: Graph, router: R) -> Self {
        Self {
            graph,
            router,
            config: FleetConfig::default(),
            robots: Vec::new(),
            orders: Vec::new(),
        }
    }

    pub fn config(mut self, config: FleetConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a robot.  Its status is kept as given: a robot seeded EXECUTING
    /// stays busy until [`Fleet::release_robot`] frees it.
    pub fn robot(mut self, robot: Robot) -> Self {
        self.robots.push(robot);
        self
    }

    pub fn robots(mut self, robots: impl IntoIterator<Item = Robot>) -> Self {
        self.robots.extend(robots);
        self
    }

    pub fn order(
        mut self,
        name:   impl Into<OrderName>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        self.orders.push((name.into(), source.into(), target.into()));
        self
    }

    /// Validate inputs, populate the store and return a ready [`Fleet`].
    ///
    /// Fails on an invalid config, a robot on an unknown node, a duplicate
    /// robot name, or any initial order [`Fleet::create_order`] rejects.
    pub fn build(self) -> SimResult<Fleet<R>> {
        self.config.validate()?;

        let mut store = FleetStore::new();
        for robot in self.robots {
            if !self.graph.contains(robot.node.as_str()) {
                return Err(GraphError::InvalidNode(robot.node).into());
            }
            store.add_robot(robot)?;
        }

        let mut fleet = Fleet::new(self.graph, self.router, self.config, store);
        for (name, source, target) in self.orders {
            fleet.create_order(name, source, target)?;
        }
        Ok(fleet)
    }
}
