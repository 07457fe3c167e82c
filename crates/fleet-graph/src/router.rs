//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The dispatcher calls routing through the [`Router`] trait, so callers can
//! swap in another search (A*, a cached table for a static depot) without
//! touching dispatch or the tick loop.  [`DijkstraRouter`] is the default.
//!
//! # Determinism
//!
//! The frontier is ordered by `(distance, NodeIx)`: equal distances pop in
//! node declaration order, and a node's predecessor only changes on a
//! strictly shorter distance.  The same graph and query therefore always
//! yield the same path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use fleet_core::{EdgeIx, NodeId, NodeIx};

use crate::{Graph, GraphError, GraphResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Sum of edge weights along `nodes`.
    pub cost: f64,
    /// Visited nodes in order, both endpoints included.
    pub nodes: Vec<NodeId>,
}

impl Path {
    /// The zero-cost path that stays on `node`.
    pub fn trivial(node: NodeId) -> Self {
        Self { cost: 0.0, nodes: vec![node] }
    }

    /// `true` if source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&NodeId> {
        self.nodes.last()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so a `Fleet` can sit behind a mutex
/// shared across request handlers.
pub trait Router: Send + Sync {
    /// Compute the least-cost path from `from` to `to`.
    ///
    /// Fails with [`GraphError::InvalidNode`] for unknown endpoints and
    /// [`GraphError::NoPathFound`] if `to` is unreachable.  `from == to`
    /// yields a trivial path rather than an error.
    fn route(&self, graph: &Graph, from: &str, to: &str) -> GraphResult<Path>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Uniform-cost search over the CSR half-edges.  Recomputed on every query;
/// the graphs this engine runs on are small.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &Graph, from: &str, to: &str) -> GraphResult<Path> {
        shortest_path(graph, from, to)
    }
}

/// Least-cost path between `start` and `goal`.
pub fn shortest_path(graph: &Graph, start: &str, goal: &str) -> GraphResult<Path> {
    let from = graph.require(start)?;
    let to   = graph.require(goal)?;

    if from == to {
        return Ok(Path::trivial(graph.node_id(from).clone()));
    }

    let n = graph.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeIx::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap via Reverse; NodeIx is the secondary key.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeIx)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, from, to, cost));
        }

        // Stale entry.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + graph.edge_weight[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    Err(GraphError::NoPathFound {
        from: graph.node_id(from).clone(),
        to:   graph.node_id(to).clone(),
    })
}

fn reconstruct(graph: &Graph, prev_edge: &[EdgeIx], from: NodeIx, to: NodeIx, cost: f64) -> Path {
    let mut nodes = vec![graph.node_id(to).clone()];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if e == EdgeIx::INVALID {
            break;
        }
        cur = graph.edge_from[e.index()];
        nodes.push(graph.node_id(cur).clone());
    }
    nodes.reverse();
    Path { cost, nodes }
}
