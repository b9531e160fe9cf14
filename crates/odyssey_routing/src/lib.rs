pub mod as_the_crow_flies;
pub mod constants;
pub mod dijkstra;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod location_index;
pub mod road_network;
pub mod routing_graph_provider;
pub mod stopwatch;
pub mod types;
pub mod weighting;

#[cfg(test)]
pub(crate) mod test_graph_utils;
