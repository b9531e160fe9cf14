use serde::Serialize;

use crate::problem::location::LocationIdx;

use super::arc_arena::Arc;

/// Closed tour starting and ending at the depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    stops: Vec<LocationIdx>,
    arcs: Vec<Arc>,
    cost: f64,
}

impl Tour {
    pub(crate) fn new(stops: Vec<LocationIdx>, arcs: Vec<Arc>, cost: f64) -> Self {
        Tour { stops, arcs, cost }
    }

    /// Tour of an instance made of the depot only.
    pub fn depot_only() -> Self {
        Tour {
            stops: vec![LocationIdx::new(0), LocationIdx::new(0)],
            arcs: vec![],
            cost: 0.0,
        }
    }

    /// Visited locations in order, the depot appears first and last.
    pub fn stops(&self) -> &[LocationIdx] {
        &self.stops
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of distinct locations visited.
    pub fn num_locations(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Sum of the costs of the traversed arcs.
    pub fn arcs_cost(&self) -> f64 {
        self.arcs.iter().map(|arc| arc.cost()).sum()
    }
}
