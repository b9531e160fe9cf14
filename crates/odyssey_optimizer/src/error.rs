use odyssey_matrix_providers::error::MatrixError;
use thiserror::Error;

use crate::{
    parsers::error::InputFormatError, tsp::solution_extractor::SolutionIntegrityError,
    tsp::tour::Tour,
};

#[derive(Error, Debug)]
pub enum TourError {
    #[error(transparent)]
    Input(#[from] InputFormatError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("A tour needs at least 2 locations, got {count}")]
    TooFewLocations { count: usize },
    #[error("The tour model is infeasible")]
    ModelInfeasible,
    #[error("The tour model is unbounded")]
    ModelUnbounded,
    #[error("The solver stopped at its limit before proving optimality")]
    ModelTimeLimit { incumbent: Option<Tour> },
    #[error("The solver returned an invalid tour: {0}")]
    SolutionIntegrity(#[from] SolutionIntegrityError),
}
