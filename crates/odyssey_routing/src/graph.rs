use std::{
    fs::File,
    hash::{Hash, Hasher},
    io::BufReader,
    path::Path,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::GraphError,
    geometry::CoordinateSystem,
    types::{EdgeId, NodeId},
};

#[derive(Debug, Clone)]
pub struct GraphEdge {
    id: EdgeId,
    start_node: NodeId,
    end_node: NodeId,
    length: f64,
    speed_kmh: Option<f64>,
}

impl GraphEdge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    /// Physical length in meters (or coordinate units for cartesian graphs).
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        self.speed_kmh
    }
}

impl Hash for GraphEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_node.hash(state);
        self.end_node.hash(state);
        state.write_u64(self.length.to_bits());
        self.speed_kmh.map(f64::to_bits).hash(state);
    }
}

/// Directed road graph. Every edge is traversable from `start_node` to
/// `end_node` only, two-way roads are stored as two edges.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    coordinates: CoordinateSystem,
    nodes: Vec<geo::Point>,
    edges: Vec<GraphEdge>,
    adjacency_list: Vec<Vec<EdgeId>>,
}

impl RoadGraph {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RoadGraph, GraphError> {
        let file = File::open(path.as_ref())?;
        let graph_file: RoadGraphFile = serde_json::from_reader(BufReader::new(file))?;
        let graph = RoadGraph::try_from(graph_file)?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Loaded road graph from {}",
            path.as_ref().display()
        );

        Ok(graph)
    }

    pub fn coordinates(&self) -> CoordinateSystem {
        self.coordinates
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        node < self.nodes.len()
    }

    pub fn nodes(&self) -> &[geo::Point] {
        &self.nodes
    }

    pub fn node_point(&self, node: NodeId) -> geo::Point {
        self.nodes[node]
    }

    pub fn edge(&self, edge: EdgeId) -> &GraphEdge {
        &self.edges[edge]
    }

    /// Edges leaving `node`.
    pub fn node_edges_iter(&self, node: NodeId) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.adjacency_list[node]
            .iter()
            .map(move |&edge_id| &self.edges[edge_id])
    }
}

/// Hashes the full topology: node positions and every edge with its length
/// and speed. Graphs that route differently never share a hash.
impl Hash for RoadGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinates.hash(state);

        self.nodes.len().hash(state);
        for node in &self.nodes {
            state.write_u64(node.x().to_bits());
            state.write_u64(node.y().to_bits());
        }

        self.edges.hash(state);
    }
}

#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    graph: RoadGraph,
}

impl RoadGraphBuilder {
    pub fn new(coordinates: CoordinateSystem) -> Self {
        RoadGraphBuilder {
            graph: RoadGraph {
                coordinates,
                ..RoadGraph::default()
            },
        }
    }

    pub fn with_capacity(coordinates: CoordinateSystem, nodes: usize, edges: usize) -> Self {
        RoadGraphBuilder {
            graph: RoadGraph {
                coordinates,
                nodes: Vec::with_capacity(nodes),
                edges: Vec::with_capacity(edges),
                adjacency_list: Vec::with_capacity(nodes),
            },
        }
    }

    pub fn add_node(&mut self, point: geo::Point) -> NodeId {
        let node_id = self.graph.nodes.len();
        self.graph.nodes.push(point);
        self.graph.adjacency_list.push(vec![]);
        node_id
    }

    /// Adds a one-way edge from `from` to `to`.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length: f64,
        speed_kmh: Option<f64>,
    ) -> Result<EdgeId, GraphError> {
        let edge_id = self.graph.edges.len();

        for node in [from, to] {
            if !self.graph.has_node(node) {
                return Err(GraphError::UnknownNode {
                    edge: edge_id,
                    node,
                });
            }
        }

        if !length.is_finite() || length < 0.0 {
            return Err(GraphError::InvalidLength {
                edge: edge_id,
                length,
            });
        }

        self.graph.edges.push(GraphEdge {
            id: edge_id,
            start_node: from,
            end_node: to,
            length,
            speed_kmh,
        });
        self.graph.adjacency_list[from].push(edge_id);

        Ok(edge_id)
    }

    /// Adds a two-way road, stored as one edge in each direction.
    pub fn add_road(
        &mut self,
        a: NodeId,
        b: NodeId,
        length: f64,
        speed_kmh: Option<f64>,
    ) -> Result<(), GraphError> {
        self.add_edge(a, b, length, speed_kmh)?;
        self.add_edge(b, a, length, speed_kmh)?;
        Ok(())
    }

    pub fn build(self) -> RoadGraph {
        self.graph
    }
}

/// On-disk representation of a prepared road graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RoadGraphFile {
    /// Interpretation of node coordinates, `lat_lon` nodes use `x` for the
    /// longitude and `y` for the latitude.
    #[serde(default)]
    pub coordinates: CoordinateSystem,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct NodeRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    /// Length of the road segment in meters
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_kmh: Option<f64>,
    #[serde(default = "default_oneway")]
    pub oneway: bool,
}

fn default_oneway() -> bool {
    true
}

impl TryFrom<RoadGraphFile> for RoadGraph {
    type Error = GraphError;

    fn try_from(file: RoadGraphFile) -> Result<Self, Self::Error> {
        let mut builder =
            RoadGraphBuilder::with_capacity(file.coordinates, file.nodes.len(), file.edges.len());

        for node in &file.nodes {
            builder.add_node(geo::Point::new(node.x, node.y));
        }

        for edge in &file.edges {
            if edge.oneway {
                builder.add_edge(edge.from, edge.to, edge.length, edge.speed_kmh)?;
            } else {
                builder.add_road(edge.from, edge.to, edge.length, edge.speed_kmh)?;
            }
        }

        Ok(builder.build())
    }
}

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(RoadGraphFile);
    serde_json::to_string_pretty(&schema)
}
