/// Handle of a variable registered in a `MilpSolver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(usize);

impl Var {
    pub const fn new(index: usize) -> Self {
        Var(index)
    }

    pub const fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Binary,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl Relation {
    pub fn is_satisfied(&self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Relation::Eq => (lhs - rhs).abs() <= tolerance,
            Relation::Le => lhs <= rhs + tolerance,
            Relation::Ge => lhs >= rhs - tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    /// A time or node limit stopped the search, an incumbent may exist.
    TimeLimit,
}

/// Sum of `coefficient * variable` terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(Var, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinearExpr {
            terms: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, var: Var, coefficient: f64) -> &mut Self {
        self.terms.push((var, coefficient));
        self
    }

    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms with repeated variables summed up, ordered by variable.
    pub fn merged_terms(&self) -> Vec<(Var, f64)> {
        let mut terms = self.terms.clone();
        terms.sort_by_key(|&(var, _)| var);

        let mut merged: Vec<(Var, f64)> = Vec::with_capacity(terms.len());
        for (var, coefficient) in terms {
            match merged.last_mut() {
                Some((last, total)) if *last == var => *total += coefficient,
                _ => merged.push((var, coefficient)),
            }
        }

        merged
    }
}

impl FromIterator<(Var, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (Var, f64)>>(iter: I) -> Self {
        LinearExpr {
            terms: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_terms() {
        let mut expr = LinearExpr::new();
        expr.add(Var::new(2), 1.0)
            .add(Var::new(0), 2.0)
            .add(Var::new(2), 3.0);

        assert_eq!(
            expr.merged_terms(),
            vec![(Var::new(0), 2.0), (Var::new(2), 4.0)]
        );
    }

    #[test]
    fn test_relation() {
        assert!(Relation::Eq.is_satisfied(1.0 + 1e-10, 1.0, 1e-9));
        assert!(Relation::Le.is_satisfied(0.5, 1.0, 0.0));
        assert!(!Relation::Ge.is_satisfied(0.5, 1.0, 1e-9));
    }
}
