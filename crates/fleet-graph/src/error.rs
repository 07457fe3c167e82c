//! Graph and routing error type.

use thiserror::Error;

use fleet_core::NodeId;

/// Errors produced by `fleet-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} is not part of the graph")]
    InvalidNode(NodeId),

    #[error("no path from {from} to {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    #[error("node {0} declared twice")]
    DuplicateNode(NodeId),

    #[error("edge {from}-{to} has invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },
}

pub type GraphResult<T> = Result<T, GraphError>;
