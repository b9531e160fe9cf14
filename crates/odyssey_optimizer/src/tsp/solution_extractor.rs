use thiserror::Error;
use tracing::debug;

use crate::{milp::milp_solver::MilpSolver, problem::location::LocationIdx};

use super::{arc_arena::ArcIdx, tour::Tour, tsp_model::TspModel};

/// Value above which a binary selection variable counts as selected. Absorbs
/// the floating point slack of the LP solver.
pub const SELECTION_THRESHOLD: f64 = 0.9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolutionIntegrityError {
    #[error("Location {node} has {degree} selected outgoing arcs")]
    OutDegree { node: LocationIdx, degree: usize },
    #[error("Location {node} has {degree} selected incoming arcs")]
    InDegree { node: LocationIdx, degree: usize },
    #[error("The cycle through the depot closes before visiting every location: {cycle:?}")]
    Subtour { cycle: Vec<LocationIdx> },
    #[error("The solver has no solution values")]
    MissingValues,
}

/// Turns the selection variables of a solved model into a tour.
pub struct SolutionExtractor;

impl SolutionExtractor {
    pub fn extract<S: MilpSolver>(model: &TspModel<S>) -> Result<Tour, SolutionIntegrityError> {
        let solver = model.solver();
        let arena = model.arena();
        let n = arena.num_locations();

        let cost = solver
            .objective_value()
            .ok_or(SolutionIntegrityError::MissingValues)?;

        let mut out_degree = vec![0usize; n];
        let mut in_degree = vec![0usize; n];
        let mut successor: Vec<Option<ArcIdx>> = vec![None; n];

        for (arc_idx, arc) in arena.iter() {
            let value = solver
                .value(model.selection_var(arc_idx))
                .ok_or(SolutionIntegrityError::MissingValues)?;

            if value > SELECTION_THRESHOLD {
                out_degree[arc.from().get()] += 1;
                in_degree[arc.to().get()] += 1;
                successor[arc.from().get()] = Some(arc_idx);
            }
        }

        for node in 0..n {
            if out_degree[node] != 1 {
                return Err(SolutionIntegrityError::OutDegree {
                    node: LocationIdx::new(node),
                    degree: out_degree[node],
                });
            }
            if in_degree[node] != 1 {
                return Err(SolutionIntegrityError::InDegree {
                    node: LocationIdx::new(node),
                    degree: in_degree[node],
                });
            }
        }

        let depot = LocationIdx::new(0);
        let mut stops = Vec::with_capacity(n + 1);
        let mut arcs = Vec::with_capacity(n);
        let mut current = depot;
        stops.push(depot);

        // Degrees are all 1, so the successors form a permutation and the walk
        // from the depot returns to it after at most n arcs.
        while let Some(arc_idx) = successor[current.get()] {
            let arc = *arena.arc(arc_idx);
            arcs.push(arc);
            current = arc.to();
            stops.push(current);

            if current == depot || arcs.len() > n {
                break;
            }
        }

        if arcs.len() != n || current != depot {
            return Err(SolutionIntegrityError::Subtour { cycle: stops });
        }

        debug!(cost, stops = stops.len(), "Tour extracted");

        Ok(Tour::new(stops, arcs, cost))
    }
}
