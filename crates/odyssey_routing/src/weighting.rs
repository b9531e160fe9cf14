use crate::{
    constants::{DEFAULT_SPEED_KMH, KMH_TO_METERS_PER_SECOND},
    graph::GraphEdge,
};

pub type Weight = f64;

pub trait Weighting: Send + Sync {
    /// Cost of traversing `edge`, `None` when the edge cannot be used.
    fn calc_edge_weight(&self, edge: &GraphEdge) -> Option<Weight>;

    fn name(&self) -> &'static str;

    /// Identifies the weighting together with its parameters.
    fn fingerprint(&self) -> String {
        self.name().to_owned()
    }
}

/// Weights edges by their physical length.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthWeighting;

impl Weighting for LengthWeighting {
    #[inline(always)]
    fn calc_edge_weight(&self, edge: &GraphEdge) -> Option<Weight> {
        Some(edge.length())
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

/// Weights edges by travel time in seconds. Edges without a speed use
/// `default_speed_kmh`, edges with a non-positive speed are closed.
#[derive(Debug, Clone, Copy)]
pub struct TravelTimeWeighting {
    default_speed_kmh: f64,
}

impl TravelTimeWeighting {
    pub fn new(default_speed_kmh: f64) -> Self {
        TravelTimeWeighting { default_speed_kmh }
    }
}

impl Default for TravelTimeWeighting {
    fn default() -> Self {
        TravelTimeWeighting::new(DEFAULT_SPEED_KMH)
    }
}

impl Weighting for TravelTimeWeighting {
    fn calc_edge_weight(&self, edge: &GraphEdge) -> Option<Weight> {
        let speed = edge.speed_kmh().unwrap_or(self.default_speed_kmh);
        if speed <= 0.0 || !speed.is_finite() {
            return None;
        }

        Some(edge.length() / (speed * KMH_TO_METERS_PER_SECOND))
    }

    fn name(&self) -> &'static str {
        "travel_time"
    }

    fn fingerprint(&self) -> String {
        format!("{}@{:016x}", self.name(), self.default_speed_kmh.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use crate::{geometry::CoordinateSystem, graph::RoadGraphBuilder};

    use super::*;

    fn two_edges() -> crate::graph::RoadGraph {
        let mut builder = RoadGraphBuilder::new(CoordinateSystem::Cartesian);
        let a = builder.add_node(geo::Point::new(0.0, 0.0));
        let b = builder.add_node(geo::Point::new(1.0, 0.0));
        builder.add_edge(a, b, 1000.0, Some(36.0)).unwrap();
        builder.add_edge(b, a, 1000.0, Some(0.0)).unwrap();
        builder.build()
    }

    #[test]
    fn test_length_weighting() {
        let graph = two_edges();
        assert_eq!(LengthWeighting.calc_edge_weight(graph.edge(0)), Some(1000.0));
    }

    #[test]
    fn test_travel_time_weighting() {
        let graph = two_edges();
        let weighting = TravelTimeWeighting::default();

        // 1km at 36km/h = 10m/s
        let seconds = weighting.calc_edge_weight(graph.edge(0)).unwrap();
        assert!((seconds - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_time_closed_edge() {
        let graph = two_edges();
        let weighting = TravelTimeWeighting::default();
        assert_eq!(weighting.calc_edge_weight(graph.edge(1)), None);
    }
}
