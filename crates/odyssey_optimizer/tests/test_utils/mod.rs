#![allow(dead_code)]

use odyssey_matrix_providers::distance_matrix::DistanceMatrix;
use odyssey_optimizer::{
    milp::{
        linear_expr::{Direction, LinearExpr, Relation, Status, Var},
        milp_solver::MilpSolver,
    },
    problem::{
        location::{Location, LocationIdx},
        location_set::LocationSet,
    },
    tsp::tour::Tour,
};
use odyssey_routing::{
    geometry::CoordinateSystem, graph::RoadGraphBuilder, road_network::RoadNetwork,
};

pub fn cartesian_locations(points: &[(f64, f64)]) -> LocationSet {
    LocationSet::new(
        CoordinateSystem::Cartesian,
        points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Location::from_cartesian(LocationIdx::new(id), x, y))
            .collect(),
    )
    .unwrap()
}

pub fn crow_flies(locations: &LocationSet) -> RoadNetwork {
    RoadNetwork::as_the_crow_flies(&locations.points(), locations.coordinates()).unwrap()
}

/// Road network with one node per location and the given one-way edges.
pub fn one_way_network(locations: &LocationSet, edges: &[(usize, usize, f64)]) -> RoadNetwork {
    let mut builder = RoadGraphBuilder::new(locations.coordinates());
    for point in locations.points() {
        builder.add_node(point);
    }
    for &(from, to, length) in edges {
        builder.add_edge(from, to, length, None).unwrap();
    }
    RoadNetwork::new(builder.build())
}

pub fn stop_ids(tour: &Tour) -> Vec<usize> {
    tour.stops().iter().map(|stop| stop.get()).collect()
}

/// Checks that `tour` is a single cycle through the depot visiting each of
/// the `n` locations once.
pub fn assert_valid_tour(tour: &Tour, n: usize) {
    let stops = stop_ids(tour);
    assert_eq!(stops.len(), n + 1, "{stops:?}");
    assert_eq!(stops.first(), Some(&0));
    assert_eq!(stops.last(), Some(&0));

    let mut visited = vec![0usize; n];
    for &stop in &stops[..n] {
        visited[stop] += 1;
    }
    assert!(visited.iter().all(|&count| count == 1), "{stops:?}");

    let mut out_degree = vec![0usize; n];
    let mut in_degree = vec![0usize; n];
    for (index, arc) in tour.arcs().iter().enumerate() {
        assert_eq!(arc.from().get(), stops[index]);
        assert_eq!(arc.to().get(), stops[index + 1]);
        out_degree[arc.from().get()] += 1;
        in_degree[arc.to().get()] += 1;
    }
    assert!(out_degree.iter().all(|&degree| degree == 1));
    assert!(in_degree.iter().all(|&degree| degree == 1));

    // Removing the depot leaves a single path over the other locations
    let inner: Vec<usize> = stops[1..n].to_vec();
    assert_eq!(inner.len(), n - 1);
    assert!(!inner.contains(&0));

    assert!((tour.cost() - tour.arcs_cost()).abs() < 1e-6 * tour.cost().abs().max(1.0));
}

/// Cost of the best tour by enumerating every permutation of the non-depot
/// locations.
pub fn brute_force_cost(matrix: &DistanceMatrix) -> f64 {
    fn permute(
        matrix: &DistanceMatrix,
        current: usize,
        remaining: &mut Vec<usize>,
        cost: f64,
        best: &mut f64,
    ) {
        if remaining.is_empty() {
            *best = best.min(cost + matrix.distance(current, 0));
            return;
        }

        for index in 0..remaining.len() {
            let next = remaining.remove(index);
            permute(
                matrix,
                next,
                remaining,
                cost + matrix.distance(current, next),
                best,
            );
            remaining.insert(index, next);
        }
    }

    let mut remaining: Vec<usize> = (1..matrix.num_locations()).collect();
    let mut best = f64::INFINITY;
    permute(matrix, 0, &mut remaining, 0.0, &mut best);
    best
}

/// Fails the test as soon as anything is registered.
pub struct PanickingSolver;

impl MilpSolver for PanickingSolver {
    fn add_binary_variable(&mut self, name: &str) -> Var {
        panic!("solver called for {name}")
    }

    fn add_continuous_variable(&mut self, name: &str, _lower_bound: f64) -> Var {
        panic!("solver called for {name}")
    }

    fn add_linear_constraint(&mut self, _: LinearExpr, _: Relation, _: f64, name: &str) {
        panic!("solver called for {name}")
    }

    fn set_objective(&mut self, _: LinearExpr, _: Direction) {
        panic!("solver called for the objective")
    }

    fn optimize(&mut self) -> Status {
        panic!("solver optimized")
    }

    fn value(&self, _: Var) -> Option<f64> {
        None
    }

    fn objective_value(&self) -> Option<f64> {
        None
    }
}
