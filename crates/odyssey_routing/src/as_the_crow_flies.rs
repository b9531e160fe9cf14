use crate::{
    error::GraphError,
    geometry::CoordinateSystem,
    graph::{RoadGraph, RoadGraphBuilder},
    road_network::RoadNetwork,
    weighting::LengthWeighting,
};

/// Complete directed graph over `points` where every edge has the
/// straight-line distance between its endpoints as length.
pub fn as_the_crow_flies_graph(
    points: &[geo::Point],
    coordinates: CoordinateSystem,
) -> Result<RoadGraph, GraphError> {
    let len = points.len();
    let mut builder = RoadGraphBuilder::with_capacity(coordinates, len, len * len.saturating_sub(1));

    for &point in points {
        builder.add_node(point);
    }

    for (from, &from_point) in points.iter().enumerate() {
        for (to, &to_point) in points.iter().enumerate() {
            if from == to {
                continue;
            }

            let length = coordinates.distance(from_point, to_point);
            builder.add_edge(from, to, length, None)?;
        }
    }

    Ok(builder.build())
}

impl RoadNetwork {
    pub fn as_the_crow_flies(
        points: &[geo::Point],
        coordinates: CoordinateSystem,
    ) -> Result<RoadNetwork, GraphError> {
        Ok(RoadNetwork::with_weighting(
            as_the_crow_flies_graph(points, coordinates)?,
            Box::new(LengthWeighting),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::routing_graph_provider::RoutingGraphProvider;

    use super::*;

    #[test]
    fn test_complete_graph() {
        let points = vec![
            geo::Point::new(0.0, 0.0),
            geo::Point::new(3.0, 0.0),
            geo::Point::new(3.0, 4.0),
        ];
        let graph = as_the_crow_flies_graph(&points, CoordinateSystem::Cartesian).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 6);
        for node in 0..3 {
            assert_eq!(graph.node_edges_iter(node).count(), 2);
        }
    }

    #[test]
    fn test_crow_flies_distances() {
        let points = vec![
            geo::Point::new(0.0, 0.0),
            geo::Point::new(3.0, 0.0),
            geo::Point::new(3.0, 4.0),
        ];
        let network = RoadNetwork::as_the_crow_flies(&points, CoordinateSystem::Cartesian).unwrap();

        let a = network.nearest_node(points[0]).unwrap();
        let c = network.nearest_node(points[2]).unwrap();
        let distance = network.shortest_path_length(a, c).unwrap();
        assert!((distance - 5.0).abs() < 1e-9);
    }
}
