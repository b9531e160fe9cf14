use geo::{Distance, Euclidean, Haversine};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the two coordinates of a point are interpreted.
///
/// Geographic points are stored as `geo::Point` with `x = longitude` and
/// `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    #[default]
    LatLon,
    Cartesian,
}

impl CoordinateSystem {
    /// Straight-line distance between two points, in meters for geographic
    /// points and in coordinate units for cartesian ones.
    pub fn distance(&self, from: geo::Point, to: geo::Point) -> f64 {
        match self {
            CoordinateSystem::LatLon => Haversine.distance(from, to),
            CoordinateSystem::Cartesian => Euclidean.distance(&from, &to),
        }
    }
}
