use rstar::primitives::GeomWithData;
use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::{geometry::CoordinateSystem, graph::RoadGraph, types::NodeId};

/// Position of a node in the index space. Geographic nodes are stored as unit
/// vectors on the sphere: the chord length grows with the great-circle
/// distance, so the nearest chord is the nearest node by Haversine and the
/// envelopes stay in the same metric as the objects.
pub enum IndexedPoint {
    Haversine { unit: [f64; 3] },
    Euclidean { x: f64, y: f64 },
}

impl IndexedPoint {
    fn new(point: geo::Point, coordinates: CoordinateSystem) -> Self {
        match coordinates {
            CoordinateSystem::LatLon => {
                let lat = point.y().to_radians();
                let lon = point.x().to_radians();
                IndexedPoint::Haversine {
                    unit: [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()],
                }
            }
            CoordinateSystem::Cartesian => IndexedPoint::Euclidean {
                x: point.x(),
                y: point.y(),
            },
        }
    }

    fn position(&self) -> [f64; 3] {
        match *self {
            IndexedPoint::Haversine { unit } => unit,
            IndexedPoint::Euclidean { x, y } => [x, y, 0.0],
        }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position())
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        self.position()
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

pub struct IndexedData {
    node_id: NodeId,
}

pub type NodeLocationIndexObject = GeomWithData<IndexedPoint, IndexedData>;

/// Spatial index over the nodes of a road graph, used to snap coordinates to
/// the closest routable node.
pub struct NodeLocationIndex {
    coordinates: CoordinateSystem,
    tree: RTree<NodeLocationIndexObject>,
}

impl NodeLocationIndex {
    pub fn build_from_graph(graph: &RoadGraph) -> NodeLocationIndex {
        let coordinates = graph.coordinates();

        let tree: RTree<NodeLocationIndexObject> = RTree::bulk_load(
            graph
                .nodes()
                .iter()
                .enumerate()
                .map(|(node_id, &point)| {
                    NodeLocationIndexObject::new(
                        IndexedPoint::new(point, coordinates),
                        IndexedData { node_id },
                    )
                })
                .collect(),
        );

        NodeLocationIndex { coordinates, tree }
    }

    pub fn nearest<P>(&self, point: P) -> Option<NodeId>
    where
        P: Into<geo::Point>,
    {
        let query = IndexedPoint::new(point.into(), self.coordinates).position();
        self.tree
            .nearest_neighbor(&query)
            .map(|geom_with_data| geom_with_data.data.node_id)
    }
}
