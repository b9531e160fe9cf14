use super::linear_expr::{Direction, LinearExpr, Relation, Status, Var};

/// Mixed-integer linear programming backend.
///
/// Variables and constraints are registered first, `optimize` then blocks
/// until the search completes or a limit is hit. Values are only available
/// when an incumbent solution exists.
pub trait MilpSolver {
    fn add_binary_variable(&mut self, name: &str) -> Var;

    fn add_continuous_variable(&mut self, name: &str, lower_bound: f64) -> Var;

    fn add_linear_constraint(&mut self, expr: LinearExpr, relation: Relation, rhs: f64, name: &str);

    fn set_objective(&mut self, expr: LinearExpr, direction: Direction);

    fn optimize(&mut self) -> Status;

    fn value(&self, var: Var) -> Option<f64>;

    fn objective_value(&self) -> Option<f64>;
}
