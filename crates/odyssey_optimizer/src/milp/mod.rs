pub mod branch_and_bound;
pub mod linear_expr;
pub mod milp_params;
pub mod milp_solver;
