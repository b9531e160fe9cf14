use std::{
    hash::{Hash, Hasher},
    path::Path,
};

use fxhash::FxHasher64;

use tracing::debug;

use crate::{
    dijkstra::Dijkstra,
    error::{GraphError, RoutingError},
    graph::RoadGraph,
    location_index::NodeLocationIndex,
    routing_graph_provider::RoutingGraphProvider,
    stopwatch::Stopwatch,
    types::NodeId,
    weighting::{LengthWeighting, Weight, Weighting},
};

pub struct RoadNetwork {
    graph: RoadGraph,
    index: NodeLocationIndex,
    weighting: Box<dyn Weighting>,
    fingerprint: String,
}

impl RoadNetwork {
    pub fn new(graph: RoadGraph) -> Self {
        Self::with_weighting(graph, Box::new(LengthWeighting))
    }

    pub fn with_weighting(graph: RoadGraph, weighting: Box<dyn Weighting>) -> Self {
        let stopwatch = Stopwatch::new("build node index");
        let index = NodeLocationIndex::build_from_graph(&graph);
        stopwatch.report();

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            weighting = weighting.name(),
            "Road network ready"
        );

        let mut hasher = FxHasher64::default();
        graph.hash(&mut hasher);
        let fingerprint = format!("{:016x}:{}", hasher.finish(), weighting.fingerprint());

        RoadNetwork {
            graph,
            index,
            weighting,
            fingerprint,
        }
    }

    pub fn from_file<P: AsRef<Path>>(
        path: P,
        weighting: Box<dyn Weighting>,
    ) -> Result<Self, GraphError> {
        let graph = RoadGraph::from_file(path)?;
        Ok(Self::with_weighting(graph, weighting))
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn weighting(&self) -> &dyn Weighting {
        self.weighting.as_ref()
    }
}

impl RoutingGraphProvider for RoadNetwork {
    fn nearest_node(&self, point: geo::Point) -> Result<NodeId, RoutingError> {
        self.index.nearest(point).ok_or(RoutingError::EmptyGraph)
    }

    fn shortest_path_length(&self, from: NodeId, to: NodeId) -> Result<Weight, RoutingError> {
        let mut dijkstra = Dijkstra::new();
        dijkstra.calc_path_length(&self.graph, self.weighting.as_ref(), from, to)
    }

    fn fingerprint(&self) -> String {
        self.fingerprint.clone()
    }
}
