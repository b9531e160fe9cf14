use crate::{error::RoutingError, types::NodeId, weighting::Weight};

/// Read-only access to a routing graph: snapping coordinates to nodes and
/// answering single-pair shortest-path queries.
pub trait RoutingGraphProvider {
    fn nearest_node(&self, point: geo::Point) -> Result<NodeId, RoutingError>;

    /// Length of the shortest path from `from` to `to` under the provider's
    /// weighting, `RoutingError::NoPath` when `to` cannot be reached.
    fn shortest_path_length(&self, from: NodeId, to: NodeId) -> Result<Weight, RoutingError>;

    /// Human readable identifier, used as part of the matrix cache key.
    fn fingerprint(&self) -> String {
        String::from("unknown")
    }
}

impl<T: RoutingGraphProvider + ?Sized> RoutingGraphProvider for &T {
    fn nearest_node(&self, point: geo::Point) -> Result<NodeId, RoutingError> {
        (**self).nearest_node(point)
    }

    fn shortest_path_length(&self, from: NodeId, to: NodeId) -> Result<Weight, RoutingError> {
        (**self).shortest_path_length(from, to)
    }

    fn fingerprint(&self) -> String {
        (**self).fingerprint()
    }
}
