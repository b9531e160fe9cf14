use odyssey_matrix_providers::distance_matrix::DistanceMatrix;
use serde::Serialize;

use crate::{define_index_newtype, problem::location::LocationIdx};

define_index_newtype!(ArcIdx, Arc);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arc {
    from: LocationIdx,
    to: LocationIdx,
    cost: f64,
}

impl Arc {
    pub fn from(&self) -> LocationIdx {
        self.from
    }

    pub fn to(&self) -> LocationIdx {
        self.to
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// Arcs with a finite cost, addressable by `(from, to)` through a dense
/// `n * n` slot table.
#[derive(Debug, Clone)]
pub struct ArcArena {
    num_locations: usize,
    slots: Vec<Option<ArcIdx>>,
    arcs: Vec<Arc>,
}

impl ArcArena {
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        let n = matrix.num_locations();
        let mut slots = vec![None; n * n];
        let mut arcs = Vec::with_capacity(n * n.saturating_sub(1));

        for from in 0..n {
            for (to, &cost) in matrix.row(from).iter().enumerate() {
                if from == to || !cost.is_finite() {
                    continue;
                }

                slots[from * n + to] = Some(ArcIdx::new(arcs.len()));
                arcs.push(Arc {
                    from: LocationIdx::new(from),
                    to: LocationIdx::new(to),
                    cost,
                });
            }
        }

        ArcArena {
            num_locations: n,
            slots,
            arcs,
        }
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn get(&self, from: LocationIdx, to: LocationIdx) -> Option<ArcIdx> {
        self.slots[from.get() * self.num_locations + to.get()]
    }

    pub fn arc(&self, arc: ArcIdx) -> &Arc {
        &self.arcs[arc]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArcIdx, &Arc)> {
        self.arcs
            .iter()
            .enumerate()
            .map(|(index, arc)| (ArcIdx::new(index), arc))
    }

    pub fn outgoing(&self, from: LocationIdx) -> impl Iterator<Item = ArcIdx> + '_ {
        let start = from.get() * self.num_locations;
        self.slots[start..start + self.num_locations]
            .iter()
            .filter_map(|slot| *slot)
    }

    pub fn incoming(&self, to: LocationIdx) -> impl Iterator<Item = ArcIdx> + '_ {
        (0..self.num_locations)
            .filter_map(move |from| self.slots[from * self.num_locations + to.get()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(index: usize) -> LocationIdx {
        LocationIdx::new(index)
    }

    #[test]
    fn test_all_arcs() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap();
        let arena = ArcArena::from_matrix(&matrix);

        assert_eq!(arena.len(), 6);
        assert_eq!(arena.get(loc(0), loc(0)), None);

        let arc = arena.arc(arena.get(loc(2), loc(1)).unwrap());
        assert_eq!(arc.from(), loc(2));
        assert_eq!(arc.to(), loc(1));
        assert_eq!(arc.cost(), 6.0);

        assert_eq!(arena.outgoing(loc(1)).count(), 2);
        for arc in arena.incoming(loc(2)) {
            assert_eq!(arena.arc(arc).to(), loc(2));
        }
    }

    #[test]
    fn test_infinite_cost_is_absent() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, f64::INFINITY, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap();
        let arena = ArcArena::from_matrix(&matrix);

        assert_eq!(arena.len(), 5);
        assert_eq!(arena.get(loc(0), loc(1)), None);
        assert!(arena.get(loc(1), loc(0)).is_some());
        assert_eq!(arena.outgoing(loc(0)).count(), 1);
        assert_eq!(arena.incoming(loc(1)).count(), 1);
    }
}
