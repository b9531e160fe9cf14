use jiff::Timestamp;
use minilp::{ComparisonOp, OptimizationDirection, Problem, Solution};
use odyssey_routing::stopwatch::Stopwatch;
use tracing::{debug, info, warn};

use super::{
    linear_expr::{Direction, LinearExpr, Relation, Status, Var, VarKind},
    milp_params::MilpParams,
    milp_solver::MilpSolver,
};

const FEASIBILITY_TOLERANCE: f64 = 1e-9;

struct VariableDef {
    name: String,
    kind: VarKind,
    lower_bound: f64,
    upper_bound: f64,
}

struct ConstraintDef {
    name: String,
    expr: LinearExpr,
    relation: Relation,
    rhs: f64,
}

struct Incumbent {
    values: Vec<f64>,
    objective: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStatistics {
    pub nodes: usize,
    pub incumbents: usize,
    pub pruned: usize,
}

/// Depth-first branch-and-bound over the `minilp` LP relaxation.
///
/// The model is only recorded while it is being built. Each `optimize` call
/// builds a fresh `minilp::Problem`, solves the relaxation and branches on the
/// most fractional binary variable, exploring the closest rounding first.
pub struct BranchAndBoundSolver {
    params: MilpParams,
    variables: Vec<VariableDef>,
    constraints: Vec<ConstraintDef>,
    objective: LinearExpr,
    direction: Direction,
    incumbent: Option<Incumbent>,
    statistics: SearchStatistics,
}

impl BranchAndBoundSolver {
    pub fn new(params: MilpParams) -> Self {
        BranchAndBoundSolver {
            params,
            variables: vec![],
            constraints: vec![],
            objective: LinearExpr::new(),
            direction: Direction::Minimize,
            incumbent: None,
            statistics: SearchStatistics::default(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_name(&self, var: Var) -> &str {
        &self.variables[var.index()].name
    }

    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    fn add_variable(&mut self, name: &str, kind: VarKind, lower_bound: f64, upper_bound: f64) -> Var {
        let var = Var::new(self.variables.len());
        self.variables.push(VariableDef {
            name: name.to_owned(),
            kind,
            lower_bound,
            upper_bound,
        });
        var
    }

    /// `None` when a constraint without terms can never hold.
    fn build_problem(&self) -> Option<(Problem, Vec<minilp::Variable>)> {
        let mut coefficients = vec![0.0; self.variables.len()];
        for &(var, coefficient) in self.objective.terms() {
            coefficients[var.index()] += coefficient;
        }

        let mut problem = Problem::new(match self.direction {
            Direction::Minimize => OptimizationDirection::Minimize,
            Direction::Maximize => OptimizationDirection::Maximize,
        });

        let lp_vars: Vec<minilp::Variable> = self
            .variables
            .iter()
            .zip(&coefficients)
            .map(|(variable, &coefficient)| {
                problem.add_var(coefficient, (variable.lower_bound, variable.upper_bound))
            })
            .collect();

        for constraint in &self.constraints {
            let terms = constraint.expr.merged_terms();

            if terms.is_empty() {
                if !constraint
                    .relation
                    .is_satisfied(0.0, constraint.rhs, FEASIBILITY_TOLERANCE)
                {
                    debug!(
                        constraint = %constraint.name,
                        "Constraint has no terms and cannot hold"
                    );
                    return None;
                }
                continue;
            }

            let mut expr = minilp::LinearExpr::empty();
            for (var, coefficient) in terms {
                expr.add(lp_vars[var.index()], coefficient);
            }

            let op = match constraint.relation {
                Relation::Eq => ComparisonOp::Eq,
                Relation::Le => ComparisonOp::Le,
                Relation::Ge => ComparisonOp::Ge,
            };

            problem.add_constraint(expr, op, constraint.rhs);
        }

        Some((problem, lp_vars))
    }

    /// Objective of `objective` in minimization terms.
    fn normalize(&self, objective: f64) -> f64 {
        match self.direction {
            Direction::Minimize => objective,
            Direction::Maximize => -objective,
        }
    }

    fn can_improve(&self, bound: f64) -> bool {
        match &self.incumbent {
            None => true,
            Some(incumbent) => {
                let best = self.normalize(incumbent.objective);
                bound < best - self.params.gap_tolerance * best.abs().max(1.0)
            }
        }
    }

    fn limit_reached(&self, start: Timestamp) -> bool {
        if let Some(node_limit) = self.params.node_limit
            && self.statistics.nodes >= node_limit
        {
            return true;
        }

        if let Some(time_limit) = self.params.time_limit
            && Timestamp::now().duration_since(start) > time_limit
        {
            return true;
        }

        false
    }

    /// Most fractional binary variable and its closest rounding.
    fn branching_variable(
        &self,
        solution: &Solution,
        lp_vars: &[minilp::Variable],
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64, f64)> = None;

        for (index, variable) in self.variables.iter().enumerate() {
            if variable.kind != VarKind::Binary {
                continue;
            }

            let value = solution[lp_vars[index]];
            let fractionality = (value - value.round()).abs();
            if fractionality <= self.params.integrality_tolerance {
                continue;
            }

            if best.is_none_or(|(_, _, best_fractionality)| fractionality > best_fractionality) {
                best = Some((index, value.round().clamp(0.0, 1.0), fractionality));
            }
        }

        best.map(|(index, rounded, _)| (index, rounded))
    }

    /// Returns `true` when a limit stopped the search.
    fn search(&mut self, root: Solution, lp_vars: &[minilp::Variable], start: Timestamp) -> bool {
        let mut stack: Vec<(Solution, Option<(usize, f64)>)> = vec![(root, None)];

        while let Some((parent, fix)) = stack.pop() {
            if self.limit_reached(start) {
                return true;
            }

            let solution = match fix {
                None => parent,
                Some((index, value)) => match parent.fix_var(lp_vars[index], value) {
                    Ok(solution) => solution,
                    Err(_) => {
                        self.statistics.pruned += 1;
                        continue;
                    }
                },
            };

            self.statistics.nodes += 1;

            let bound = self.normalize(solution.objective());
            if !self.can_improve(bound) {
                self.statistics.pruned += 1;
                continue;
            }

            match self.branching_variable(&solution, lp_vars) {
                None => {
                    debug!(
                        objective = solution.objective(),
                        nodes = self.statistics.nodes,
                        "New incumbent"
                    );
                    self.statistics.incumbents += 1;
                    self.incumbent = Some(Incumbent {
                        values: lp_vars.iter().map(|&var| solution[var]).collect(),
                        objective: solution.objective(),
                    });
                }
                Some((index, closest)) => {
                    stack.push((solution.clone(), Some((index, 1.0 - closest))));
                    stack.push((solution, Some((index, closest))));
                }
            }
        }

        false
    }
}

impl MilpSolver for BranchAndBoundSolver {
    fn add_binary_variable(&mut self, name: &str) -> Var {
        self.add_variable(name, VarKind::Binary, 0.0, 1.0)
    }

    fn add_continuous_variable(&mut self, name: &str, lower_bound: f64) -> Var {
        self.add_variable(name, VarKind::Continuous, lower_bound, f64::INFINITY)
    }

    fn add_linear_constraint(&mut self, expr: LinearExpr, relation: Relation, rhs: f64, name: &str) {
        self.constraints.push(ConstraintDef {
            name: name.to_owned(),
            expr,
            relation,
            rhs,
        });
    }

    fn set_objective(&mut self, expr: LinearExpr, direction: Direction) {
        self.objective = expr;
        self.direction = direction;
    }

    fn optimize(&mut self) -> Status {
        self.incumbent = None;
        self.statistics = SearchStatistics::default();

        let stopwatch = Stopwatch::new("branch and bound");
        let start = Timestamp::now();

        let Some((problem, lp_vars)) = self.build_problem() else {
            return Status::Infeasible;
        };

        debug!(
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            "Solving LP relaxation"
        );

        let root = match problem.solve() {
            Ok(solution) => solution,
            Err(minilp::Error::Infeasible) => {
                debug!("LP relaxation is infeasible");
                return Status::Infeasible;
            }
            Err(minilp::Error::Unbounded) => {
                debug!("LP relaxation is unbounded");
                return Status::Unbounded;
            }
        };

        debug!(bound = root.objective(), "LP relaxation solved");

        let limit_hit = self.search(root, &lp_vars, start);

        info!(
            nodes = self.statistics.nodes,
            incumbents = self.statistics.incumbents,
            pruned = self.statistics.pruned,
            "Branch and bound finished in {:?}",
            stopwatch.elapsed()
        );

        if limit_hit {
            warn!(
                has_incumbent = self.incumbent.is_some(),
                "Branch and bound stopped by its limits"
            );
            Status::TimeLimit
        } else if self.incumbent.is_some() {
            Status::Optimal
        } else {
            Status::Infeasible
        }
    }

    fn value(&self, var: Var) -> Option<f64> {
        self.incumbent
            .as_ref()
            .and_then(|incumbent| incumbent.values.get(var.index()).copied())
    }

    fn objective_value(&self) -> Option<f64> {
        self.incumbent.as_ref().map(|incumbent| incumbent.objective)
    }
}
