pub mod solver_params;
pub mod tour_solver;
