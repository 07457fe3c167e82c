//! Node graph representation and builder.
//!
//! # Data layout
//!
//! Every undirected [`Edge`] is stored as two directed half-edges in
//! **Compressed Sparse Row (CSR)** order.  Given a `NodeIx n`, its outgoing
//! half-edges occupy:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Half-edge arrays (`edge_from`, `edge_to`, `edge_weight`) are sorted by
//! source node and indexed by `EdgeIx`, so a node's neighbourhood is one
//! contiguous scan in Dijkstra's inner loop.  The declared edge list is kept
//! alongside for read-only snapshots.

use std::collections::HashMap;

use fleet_core::{EdgeIx, NodeId, NodeIx};

use crate::{GraphError, GraphResult};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// An undirected, weighted edge as declared by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from:   NodeId,
    pub to:     NodeId,
    /// Traversal cost; one unit is consumed per tick.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: f64,
}

#[cfg(feature = "serde")]
fn default_weight() -> f64 {
    1.0
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        Self { from: from.into(), to: to.into(), weight }
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Immutable undirected graph in CSR format.
///
/// Build with [`GraphBuilder`] or [`Graph::from_parts`].  Once built the graph
/// is never mutated, so it can be shared freely between readers.
#[derive(Debug, Clone)]
pub struct Graph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Node identifiers in declaration order.  Indexed by `NodeIx`.
    pub node_ids: Vec<NodeId>,

    lookup: HashMap<NodeId, NodeIx>,

    // ── CSR half-edge adjacency ───────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each half-edge.  Needed to walk `prev_edge` backwards
    /// during path reconstruction.
    pub edge_from: Vec<NodeIx>,

    /// Destination node of each half-edge.
    pub edge_to: Vec<NodeIx>,

    /// Weight of each half-edge (equal for both halves of an edge).
    pub edge_weight: Vec<f64>,

    // ── Declared edges ────────────────────────────────────────────────────
    edges: Vec<Edge>,
}

impl Graph {
    /// Build a graph from a node list and an undirected edge list.
    pub fn from_parts<I, N>(nodes: I, edges: Vec<Edge>) -> GraphResult<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        let mut b = GraphBuilder::new();
        for n in nodes {
            b.add_node(n)?;
        }
        for e in edges {
            b.add_edge(e.from, e.to, e.weight)?;
        }
        Ok(b.build())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of declared (undirected) edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    pub fn contains(&self, node: &str) -> bool {
        self.lookup.contains_key(node)
    }

    pub fn node_ix(&self, node: &str) -> Option<NodeIx> {
        self.lookup.get(node).copied()
    }

    /// Resolve `node` or fail with [`GraphError::InvalidNode`].
    pub fn require(&self, node: &str) -> GraphResult<NodeIx> {
        self.node_ix(node)
            .ok_or_else(|| GraphError::InvalidNode(NodeId::from(node)))
    }

    #[inline]
    pub fn node_id(&self, ix: NodeIx) -> &NodeId {
        &self.node_ids[ix.index()]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Iterator over the `EdgeIx`s of all half-edges leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeIx) -> impl Iterator<Item = EdgeIx> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeIx(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeIx) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Weight of the edge joining `a` and `b`, in either direction.
    ///
    /// With parallel edges the cheapest one is returned, which is the one the
    /// router would have used.  `None` if either node is unknown or the two
    /// are not adjacent.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.node_ix(a)?;
        let b = self.node_ix(b)?;
        self.out_edges(a)
            .filter(|e| self.edge_to[e.index()] == b)
            .map(|e| self.edge_weight[e.index()])
            .reduce(f64::min)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Nodes must be added before the edges that reference them.  Edge weights
/// are validated on insertion.
///
/// # Example
///
/// ```
/// use fleet_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// b.add_node("A").unwrap();
/// b.add_node("B").unwrap();
/// b.add_edge("A", "B", 2.0).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.edge_weight("B", "A"), Some(2.0));
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes:  Vec<NodeId>,
    lookup: HashMap<NodeId, NodeIx>,
    edges:  Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its dense index (sequential from 0).
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> GraphResult<NodeIx> {
        let id = id.into();
        if self.lookup.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let ix = NodeIx(self.nodes.len() as u32);
        self.lookup.insert(id.clone(), ix);
        self.nodes.push(id);
        Ok(ix)
    }

    /// Add an undirected edge between two previously added nodes.
    pub fn add_edge(
        &mut self,
        from:   impl Into<NodeId>,
        to:     impl Into<NodeId>,
        weight: f64,
    ) -> GraphResult<()> {
        let (from, to) = (from.into(), to.into());
        for n in [&from, &to] {
            if !self.lookup.contains_key(n) {
                return Err(GraphError::InvalidNode(n.clone()));
            }
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        self.edges.push(Edge { from, to, weight });
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// O(E log E) for the half-edge sort.  The sort is stable, so a node's
    /// neighbours keep edge declaration order.
    pub fn build(self) -> Graph {
        let node_count = self.nodes.len();

        // Two half-edges per declared edge.
        let mut half: Vec<(NodeIx, NodeIx, f64)> = Vec::with_capacity(self.edges.len() * 2);
        for e in &self.edges {
            let a = self.lookup[&e.from];
            let b = self.lookup[&e.to];
            half.push((a, b, e.weight));
            half.push((b, a, e.weight));
        }
        half.sort_by_key(|&(from, _, _)| from.0);

        let edge_from:   Vec<NodeIx> = half.iter().map(|h| h.0).collect();
        let edge_to:     Vec<NodeIx> = half.iter().map(|h| h.1).collect();
        let edge_weight: Vec<f64>    = half.iter().map(|h| h.2).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &half {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, half.len());

        Graph {
            node_ids: self.nodes,
            lookup: self.lookup,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            edges: self.edges,
        }
    }
}
