use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Square matrix of shortest-path distances between locations, stored as a
/// flat row-major vector.
///
/// The diagonal is always `+inf`. An off-diagonal `+inf` marks a pair with no
/// usable path. Serialized with `null` in place of `+inf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredMatrix", try_from = "StoredMatrix")]
pub struct DistanceMatrix {
    num_locations: usize,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from `num_locations * num_locations` row-major entries.
    /// Diagonal entries are overwritten with `+inf`.
    pub fn from_flat(num_locations: usize, mut distances: Vec<f64>) -> Result<Self, MatrixError> {
        let expected = num_locations * num_locations;
        if distances.len() != expected {
            return Err(MatrixError::NotSquare {
                expected,
                found: distances.len(),
            });
        }

        for from in 0..num_locations {
            for to in 0..num_locations {
                let index = from * num_locations + to;
                if from == to {
                    distances[index] = f64::INFINITY;
                    continue;
                }

                let value = distances[index];
                // +inf is allowed and means "no path"
                if value.is_nan() || value < 0.0 {
                    return Err(MatrixError::InvalidDistance { from, to, value });
                }
            }
        }

        Ok(DistanceMatrix {
            num_locations,
            distances,
        })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let num_locations = rows.len();
        let mut distances = Vec::with_capacity(num_locations * num_locations);

        for row in rows {
            if row.len() != num_locations {
                return Err(MatrixError::NotSquare {
                    expected: num_locations * num_locations,
                    found: num_locations * row.len(),
                });
            }
            distances.extend(row);
        }

        Self::from_flat(num_locations, distances)
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    #[inline(always)]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.num_locations + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.num_locations;
        &self.distances[start..start + self.num_locations]
    }

    /// Number of off-diagonal pairs without a path.
    pub fn unreachable_pairs(&self) -> usize {
        let n = self.num_locations;
        (0..n)
            .flat_map(|from| (0..n).map(move |to| (from, to)))
            .filter(|&(from, to)| from != to && !self.distance(from, to).is_finite())
            .count()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredMatrix {
    num_locations: usize,
    distances: Vec<Option<f64>>,
}

impl From<DistanceMatrix> for StoredMatrix {
    fn from(matrix: DistanceMatrix) -> Self {
        StoredMatrix {
            num_locations: matrix.num_locations,
            distances: matrix
                .distances
                .into_iter()
                .map(|distance| distance.is_finite().then_some(distance))
                .collect(),
        }
    }
}

impl TryFrom<StoredMatrix> for DistanceMatrix {
    type Error = MatrixError;

    fn try_from(stored: StoredMatrix) -> Result<Self, Self::Error> {
        DistanceMatrix::from_flat(
            stored.num_locations,
            stored
                .distances
                .into_iter()
                .map(|distance| distance.unwrap_or(f64::INFINITY))
                .collect(),
        )
    }
}
