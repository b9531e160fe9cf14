use odyssey_matrix_providers::distance_matrix::DistanceMatrix;
use tracing::{debug, warn};

use crate::{
    error::TourError,
    milp::{
        linear_expr::{Direction, LinearExpr, Relation, Status, Var},
        milp_solver::MilpSolver,
    },
    problem::location::LocationIdx,
};

use super::{
    arc_arena::{ArcArena, ArcIdx},
    solution_extractor::{SolutionExtractor, SolutionIntegrityError},
    tour::Tour,
};

/// Registers the single-commodity flow formulation of the asymmetric TSP in
/// a `MilpSolver`.
///
/// Every arc `(i, j)` with a finite cost gets a binary selection variable
/// `x[i,j]` and a continuous flow variable `g[i,j]`. The depot sends no flow
/// and every other location consumes one unit more than it receives, so
/// flow can only be routed along a single cycle through the depot.
pub struct TspModelBuilder<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> TspModelBuilder<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        TspModelBuilder { matrix }
    }

    pub fn build<S: MilpSolver>(self, mut solver: S) -> Result<TspModel<S>, TourError> {
        let n = self.matrix.num_locations();
        if n < 2 {
            return Err(TourError::TooFewLocations { count: n });
        }

        let arena = ArcArena::from_matrix(self.matrix);
        let forbidden = n * (n - 1) - arena.len();
        if forbidden > 0 {
            warn!(forbidden, "Arcs without a path are left out of the model");
        }

        let mut selection = Vec::with_capacity(arena.len());
        let mut order = Vec::with_capacity(arena.len());
        for (_, arc) in arena.iter() {
            let (from, to) = (arc.from(), arc.to());
            selection.push(solver.add_binary_variable(&format!("x[{from},{to}]")));
            order.push(solver.add_continuous_variable(&format!("g[{from},{to}]"), 0.0));
        }

        let flow_capacity = (n - 1) as f64;

        for node in (0..n).map(LocationIdx::new) {
            let out_degree: LinearExpr = arena
                .outgoing(node)
                .map(|arc| (selection[arc.get()], 1.0))
                .collect();
            solver.add_linear_constraint(out_degree, Relation::Eq, 1.0, &format!("out[{node}]"));

            let in_degree: LinearExpr = arena
                .incoming(node)
                .map(|arc| (selection[arc.get()], 1.0))
                .collect();
            solver.add_linear_constraint(in_degree, Relation::Eq, 1.0, &format!("in[{node}]"));
        }

        let depot = LocationIdx::new(0);
        let depot_flow: LinearExpr = arena
            .outgoing(depot)
            .map(|arc| (order[arc.get()], 1.0))
            .collect();
        solver.add_linear_constraint(depot_flow, Relation::Eq, 0.0, "flow[0]");

        for node in (1..n).map(LocationIdx::new) {
            let mut flow = LinearExpr::new();
            for arc in arena.outgoing(node) {
                flow.add(order[arc.get()], 1.0);
            }
            for arc in arena.incoming(node) {
                flow.add(order[arc.get()], -1.0);
            }
            solver.add_linear_constraint(flow, Relation::Eq, 1.0, &format!("flow[{node}]"));
        }

        for (arc_idx, arc) in arena.iter() {
            let (from, to) = (arc.from(), arc.to());
            let mut coupling = LinearExpr::with_capacity(2);
            coupling
                .add(order[arc_idx.get()], 1.0)
                .add(selection[arc_idx.get()], -flow_capacity);
            solver.add_linear_constraint(
                coupling,
                Relation::Le,
                0.0,
                &format!("coupling[{from},{to}]"),
            );

            let mut non_negative = LinearExpr::with_capacity(1);
            non_negative.add(order[arc_idx.get()], 1.0);
            solver.add_linear_constraint(
                non_negative,
                Relation::Ge,
                0.0,
                &format!("non_negative[{from},{to}]"),
            );
        }

        let objective: LinearExpr = arena
            .iter()
            .map(|(arc_idx, arc)| (selection[arc_idx.get()], arc.cost()))
            .collect();
        solver.set_objective(objective, Direction::Minimize);

        debug!(
            locations = n,
            arcs = arena.len(),
            variables = 2 * arena.len(),
            "Tour model built"
        );

        Ok(TspModel {
            solver,
            arena,
            selection,
        })
    }
}

/// A built tour model together with the solver it was registered in.
pub struct TspModel<S> {
    solver: S,
    arena: ArcArena,
    selection: Vec<Var>,
}

impl<S: MilpSolver> TspModel<S> {
    pub fn num_locations(&self) -> usize {
        self.arena.num_locations()
    }

    pub fn arena(&self) -> &ArcArena {
        &self.arena
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn selection_var(&self, arc: ArcIdx) -> Var {
        self.selection[arc.get()]
    }

    pub fn optimize(&mut self) -> Result<(), TourError> {
        match self.solver.optimize() {
            Status::Optimal => Ok(()),
            Status::Infeasible => Err(TourError::ModelInfeasible),
            Status::Unbounded => Err(TourError::ModelUnbounded),
            Status::TimeLimit => {
                let incumbent = self
                    .solver
                    .objective_value()
                    .and_then(|_| self.extract().ok());

                warn!(
                    has_incumbent = incumbent.is_some(),
                    "Tour search stopped before proving optimality"
                );

                Err(TourError::ModelTimeLimit { incumbent })
            }
        }
    }

    pub fn extract(&self) -> Result<Tour, SolutionIntegrityError> {
        SolutionExtractor::extract(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::ScriptedSolver;

    use super::*;

    fn triangle() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_too_few_locations() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
        let result = TspModelBuilder::new(&matrix).build(ScriptedSolver::default());
        assert!(matches!(
            result,
            Err(TourError::TooFewLocations { count: 1 })
        ));
    }

    #[test]
    fn test_registered_model() {
        let matrix = triangle();
        let model = TspModelBuilder::new(&matrix)
            .build(ScriptedSolver::default())
            .unwrap();
        let solver = model.solver();

        // 6 arcs, one x and one g each
        assert_eq!(solver.binary_names().len(), 6);
        assert_eq!(solver.continuous_names().len(), 6);
        assert!(solver.binary_names().contains(&"x[2,1]"));
        assert!(solver.continuous_names().contains(&"g[0,2]"));

        // 3 out, 3 in, 1 depot flow, 2 conservation, 6 coupling, 6 non-negativity
        assert_eq!(solver.constraints().len(), 21);

        let depot_flow = solver.constraint("flow[0]").unwrap();
        assert_eq!(depot_flow.relation, Relation::Eq);
        assert_eq!(depot_flow.rhs, 0.0);
        assert_eq!(depot_flow.expr.terms().len(), 2);

        let conservation = solver.constraint("flow[1]").unwrap();
        assert_eq!(conservation.rhs, 1.0);
        assert_eq!(
            conservation
                .expr
                .terms()
                .iter()
                .map(|(_, coefficient)| coefficient)
                .sum::<f64>(),
            0.0
        );

        let coupling = solver.constraint("coupling[1,2]").unwrap();
        assert_eq!(coupling.relation, Relation::Le);
        assert!(coupling.expr.terms().iter().any(|&(_, c)| c == -2.0));

        let (objective, direction) = solver.objective().unwrap();
        assert_eq!(direction, Direction::Minimize);
        assert_eq!(
            objective.terms().iter().map(|(_, cost)| cost).sum::<f64>(),
            21.0
        );
    }

    #[test]
    fn test_forbidden_arc_has_no_variables() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, f64::INFINITY, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap();
        let model = TspModelBuilder::new(&matrix)
            .build(ScriptedSolver::default())
            .unwrap();

        assert!(!model.solver().binary_names().contains(&"x[0,1]"));
        assert_eq!(model.solver().binary_names().len(), 5);
        assert_eq!(model.solver().constraint("out[0]").unwrap().expr.terms().len(), 1);
    }

    #[test]
    fn test_status_mapping() {
        let matrix = triangle();

        for (status, expected) in [
            (Status::Infeasible, "infeasible"),
            (Status::Unbounded, "unbounded"),
        ] {
            let mut model = TspModelBuilder::new(&matrix)
                .build(ScriptedSolver::with_status(status))
                .unwrap();
            let error = model.optimize().unwrap_err();
            assert!(error.to_string().contains(expected), "{error}");
        }

        let mut model = TspModelBuilder::new(&matrix)
            .build(ScriptedSolver::with_status(Status::TimeLimit))
            .unwrap();
        assert!(matches!(
            model.optimize(),
            Err(TourError::ModelTimeLimit { incumbent: None })
        ));
    }

    #[test]
    fn test_time_limit_keeps_incumbent() {
        let matrix = triangle();
        let solver = ScriptedSolver::with_status(Status::TimeLimit)
            .select(&["x[0,1]", "x[1,2]", "x[2,0]"], 10.0);
        let mut model = TspModelBuilder::new(&matrix).build(solver).unwrap();

        match model.optimize() {
            Err(TourError::ModelTimeLimit {
                incumbent: Some(tour),
            }) => {
                assert_eq!(tour.cost(), 10.0);
                assert_eq!(tour.num_locations(), 3);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
