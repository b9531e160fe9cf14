use odyssey_matrix_providers::{
    distance_matrix::DistanceMatrix, matrix_builder::DistanceMatrixBuilder,
};
use odyssey_routing::{routing_graph_provider::RoutingGraphProvider, stopwatch::Stopwatch};
use tracing::info;

use crate::{
    error::TourError,
    milp::{branch_and_bound::BranchAndBoundSolver, milp_solver::MilpSolver},
    problem::location_set::LocationSet,
    tsp::{tour::Tour, tsp_model::TspModelBuilder},
};

use super::solver_params::TourSolverParams;

/// Computes the optimal tour of a location set: distance matrix, tour model,
/// branch-and-bound and extraction.
pub struct TourSolver {
    params: TourSolverParams,
}

impl TourSolver {
    pub fn new(params: TourSolverParams) -> Self {
        TourSolver { params }
    }

    pub fn params(&self) -> &TourSolverParams {
        &self.params
    }

    pub fn solve<P>(&self, locations: &LocationSet, provider: &P) -> Result<Tour, TourError>
    where
        P: RoutingGraphProvider + Sync,
    {
        self.solve_with(
            locations,
            provider,
            BranchAndBoundSolver::new(self.params.milp.clone()),
        )
    }

    /// Same as [`TourSolver::solve`] with a caller provided MILP backend.
    pub fn solve_with<P, S>(
        &self,
        locations: &LocationSet,
        provider: &P,
        solver: S,
    ) -> Result<Tour, TourError>
    where
        P: RoutingGraphProvider + Sync,
        S: MilpSolver,
    {
        if locations.len() == 1 {
            info!("Single location, the tour is the depot only");
            return Ok(Tour::depot_only());
        }

        let matrix = self.build_matrix(locations, provider)?;
        self.solve_matrix_with(&matrix, solver)
    }

    pub fn build_matrix<P>(
        &self,
        locations: &LocationSet,
        provider: &P,
    ) -> Result<DistanceMatrix, TourError>
    where
        P: RoutingGraphProvider + Sync,
    {
        let builder = DistanceMatrixBuilder::new(self.params.matrix.clone());
        Ok(builder.build(&locations.points(), provider)?)
    }

    pub fn solve_matrix(&self, matrix: &DistanceMatrix) -> Result<Tour, TourError> {
        self.solve_matrix_with(matrix, BranchAndBoundSolver::new(self.params.milp.clone()))
    }

    pub fn solve_matrix_with<S>(&self, matrix: &DistanceMatrix, solver: S) -> Result<Tour, TourError>
    where
        S: MilpSolver,
    {
        if matrix.num_locations() == 1 {
            return Ok(Tour::depot_only());
        }

        let stopwatch = Stopwatch::new("build tour model");
        let mut model = TspModelBuilder::new(matrix).build(solver)?;
        stopwatch.report();

        let stopwatch = Stopwatch::new("optimize tour model");
        model.optimize()?;
        stopwatch.report();

        let tour = model.extract()?;

        info!(
            locations = tour.num_locations(),
            cost = tour.cost(),
            "Optimal tour found"
        );

        Ok(tour)
    }
}
