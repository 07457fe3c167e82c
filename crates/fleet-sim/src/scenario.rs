//! Declarative fleet setups, loadable from TOML.
//!
//! ```toml
//! [config]
//! order_timeout_ticks = 20
//!
//! [graph]
//! nodes = ["A", "B"]
//! edges = [{ from = "A", to = "B", weight = 1.0 }]
//!
//! [[robots]]
//! name = "R1"
//! node = "A"
//! status = "IDLE"      # optional
//!
//! [[orders]]
//! name = "O-1"
//! source = "A"
//! target = "B"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use fleet_core::{NodeId, OrderName, RobotName, RobotStatus};
use fleet_dispatch::Robot;
use fleet_graph::{Edge, Graph, Router};

use crate::{Fleet, FleetBuilder, FleetConfig, SimResult};

/// Node list plus undirected edges.  Edge `weight` defaults to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSpec {
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotSpec {
    pub name:   RobotName,
    pub node:   NodeId,
    #[serde(default)]
    pub status: RobotStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderSpec {
    pub name:   OrderName,
    pub source: NodeId,
    pub target: NodeId,
}

/// Everything needed to start a [`Fleet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: FleetConfig,
    pub graph:  GraphSpec,
    #[serde(default)]
    pub robots: Vec<RobotSpec>,
    #[serde(default)]
    pub orders: Vec<OrderSpec>,
}

impl Scenario {
    /// The six-node demo warehouse.
    ///
    /// ```text
    ///   A ─1─ B ─2─ C
    ///         │     │
    ///         3     2
    ///         │     │
    ///         E     D
    ///          ╲   ╱
    ///           1 2
    ///            F
    /// ```
    ///
    /// R1 idles at A, R3 at E, and R2 is busy at C with no route.  Order
    /// O-1001 runs B → D.
    pub fn warehouse() -> Self {
        let edges = [
            ("A", "B", 1.0),
            ("B", "C", 2.0),
            ("C", "D", 2.0),
            ("B", "E", 3.0),
            ("E", "F", 1.0),
            ("D", "F", 2.0),
        ];
        let robots = [
            ("R1", "A", RobotStatus::Idle),
            ("R2", "C", RobotStatus::Executing),
            ("R3", "E", RobotStatus::Idle),
        ];

        Self {
            config: FleetConfig::default(),
            graph: GraphSpec {
                nodes: ["A", "B", "C", "D", "E", "F"].map(NodeId::from).to_vec(),
                edges: edges.iter().map(|&(a, b, w)| Edge::new(a, b, w)).collect(),
            },
            robots: robots
                .iter()
                .map(|&(name, node, status)| RobotSpec {
                    name: name.into(),
                    node: node.into(),
                    status,
                })
                .collect(),
            orders: vec![OrderSpec {
                name:   "O-1001".into(),
                source: "B".into(),
                target: "D".into(),
            }],
        }
    }

    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Build the graph and hand everything to a [`FleetBuilder`].
    pub fn build<R: Router>(&self, router: R) -> SimResult<Fleet<R>> {
        let graph = Graph::from_parts(self.graph.nodes.iter().cloned(), self.graph.edges.clone())?;

        let mut builder = FleetBuilder::new(graph, router).config(self.config.clone());
        builder = builder.robots(self.robots.iter().map(|r| Robot {
            name:   r.name.clone(),
            status: r.status,
            node:   r.node.clone(),
        }));
        for o in &self.orders {
            builder = builder.order(o.name.clone(), o.source.clone(), o.target.clone());
        }
        builder.build()
    }
}
