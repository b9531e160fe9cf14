use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;

use crate::{
    error::RoutingError,
    graph::RoadGraph,
    types::NodeId,
    weighting::{Weight, Weighting},
};

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node_id: NodeId,
    weight: Weight,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight to make this a min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

struct NodeData {
    weight: Weight,
    settled: bool,
}

/// Single pair shortest path search, stops as soon as the target is settled.
pub struct Dijkstra {
    heap: BinaryHeap<HeapItem>,

    // Only the visited part of the graph gets an entry
    data: FxHashMap<NodeId, NodeData>,
}

impl Default for Dijkstra {
    fn default() -> Self {
        Dijkstra::new()
    }
}

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra {
            heap: BinaryHeap::with_capacity(1024),
            data: FxHashMap::default(),
        }
    }

    fn init(&mut self, start: NodeId) {
        self.heap.clear();
        self.data.clear();
        self.heap.push(HeapItem {
            node_id: start,
            weight: 0.0,
        });
        self.data.insert(
            start,
            NodeData {
                weight: 0.0,
                settled: false,
            },
        );
    }

    #[inline(always)]
    fn current_shortest_weight(&self, node: NodeId) -> Weight {
        self.data.get(&node).map_or(Weight::INFINITY, |data| data.weight)
    }

    #[inline(always)]
    fn is_settled(&self, node: NodeId) -> bool {
        self.data.get(&node).is_some_and(|data| data.settled)
    }

    pub fn calc_path_length(
        &mut self,
        graph: &RoadGraph,
        weighting: &dyn Weighting,
        start: NodeId,
        end: NodeId,
    ) -> Result<Weight, RoutingError> {
        for node in [start, end] {
            if !graph.has_node(node) {
                return Err(RoutingError::InvalidNode(node));
            }
        }

        self.init(start);

        while let Some(HeapItem { node_id, weight }) = self.heap.pop() {
            if self.is_settled(node_id) {
                continue;
            }

            if weight > self.current_shortest_weight(node_id) {
                continue;
            }

            if let Some(data) = self.data.get_mut(&node_id) {
                data.settled = true;
            }

            if node_id == end {
                return Ok(weight);
            }

            for edge in graph.node_edges_iter(node_id) {
                let adj_node = edge.end_node();

                if self.is_settled(adj_node) {
                    continue;
                }

                let Some(edge_weight) = weighting.calc_edge_weight(edge) else {
                    continue;
                };

                let next_weight = weight + edge_weight;

                if next_weight < self.current_shortest_weight(adj_node) {
                    self.data.insert(
                        adj_node,
                        NodeData {
                            weight: next_weight,
                            settled: false,
                        },
                    );
                    self.heap.push(HeapItem {
                        node_id: adj_node,
                        weight: next_weight,
                    });
                }
            }
        }

        Err(RoutingError::NoPath {
            from: start,
            to: end,
        })
    }
}
