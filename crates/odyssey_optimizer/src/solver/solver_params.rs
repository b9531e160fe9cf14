use odyssey_matrix_providers::matrix_params::MatrixParams;

use crate::milp::milp_params::MilpParams;

#[derive(Clone, Debug, Default)]
pub struct TourSolverParams {
    pub matrix: MatrixParams,
    pub milp: MilpParams,
}
