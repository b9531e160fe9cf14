use fxhash::FxHashMap;

use crate::milp::{
    linear_expr::{Direction, LinearExpr, Relation, Status, Var, VarKind},
    milp_solver::MilpSolver,
};

pub struct RecordedConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

/// Records the model and answers `optimize` with a fixed status. Values are
/// looked up by variable name, unnamed variables are 0.
pub struct ScriptedSolver {
    status: Status,
    variables: Vec<(String, VarKind)>,
    constraints: Vec<RecordedConstraint>,
    objective: Option<(LinearExpr, Direction)>,
    values: Option<FxHashMap<String, f64>>,
    objective_value: Option<f64>,
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        ScriptedSolver::with_status(Status::Optimal)
    }
}

impl ScriptedSolver {
    pub fn with_status(status: Status) -> Self {
        ScriptedSolver {
            status,
            variables: vec![],
            constraints: vec![],
            objective: None,
            values: None,
            objective_value: None,
        }
    }

    /// Sets the named variables to 1 and reports `objective`.
    pub fn select(mut self, names: &[&str], objective: f64) -> Self {
        let values = self.values.get_or_insert_with(FxHashMap::default);
        for name in names {
            values.insert((*name).to_owned(), 1.0);
        }
        self.objective_value = Some(objective);
        self
    }

    pub fn set_value(mut self, name: &str, value: f64) -> Self {
        self.values
            .get_or_insert_with(FxHashMap::default)
            .insert(name.to_owned(), value);
        self
    }

    fn names(&self, kind: VarKind) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|(_, var_kind)| *var_kind == kind)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn binary_names(&self) -> Vec<&str> {
        self.names(VarKind::Binary)
    }

    pub fn continuous_names(&self) -> Vec<&str> {
        self.names(VarKind::Continuous)
    }

    pub fn constraints(&self) -> &[RecordedConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&RecordedConstraint> {
        self.constraints
            .iter()
            .find(|constraint| constraint.name == name)
    }

    pub fn objective(&self) -> Option<(&LinearExpr, Direction)> {
        self.objective
            .as_ref()
            .map(|(expr, direction)| (expr, *direction))
    }

    fn add_variable(&mut self, name: &str, kind: VarKind) -> Var {
        self.variables.push((name.to_owned(), kind));
        Var::new(self.variables.len() - 1)
    }
}

impl MilpSolver for ScriptedSolver {
    fn add_binary_variable(&mut self, name: &str) -> Var {
        self.add_variable(name, VarKind::Binary)
    }

    fn add_continuous_variable(&mut self, name: &str, _lower_bound: f64) -> Var {
        self.add_variable(name, VarKind::Continuous)
    }

    fn add_linear_constraint(&mut self, expr: LinearExpr, relation: Relation, rhs: f64, name: &str) {
        self.constraints.push(RecordedConstraint {
            name: name.to_owned(),
            expr,
            relation,
            rhs,
        });
    }

    fn set_objective(&mut self, expr: LinearExpr, direction: Direction) {
        self.objective = Some((expr, direction));
    }

    fn optimize(&mut self) -> Status {
        self.status
    }

    fn value(&self, var: Var) -> Option<f64> {
        let values = self.values.as_ref()?;
        let (name, _) = self.variables.get(var.index())?;
        Some(values.get(name).copied().unwrap_or(0.0))
    }

    fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }
}
