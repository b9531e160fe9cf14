use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("No path from node {from} to node {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("The routing graph has no nodes")]
    EmptyGraph,
    #[error("Node {0} does not exist in the routing graph")]
    InvalidNode(NodeId),
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read graph file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse graph file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Edge {edge} references unknown node {node}")]
    UnknownNode { edge: usize, node: NodeId },
    #[error("Edge {edge} has an invalid length {length}")]
    InvalidLength { edge: usize, length: f64 },
}
