use crate::define_index_newtype;

define_index_newtype!(LocationIdx, Location);

/// A stop of the tour. `LocationIdx(0)` is the depot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    id: LocationIdx,
    point: geo::Point,
}

impl Location {
    pub fn new(id: LocationIdx, point: geo::Point) -> Self {
        Self { id, point }
    }

    pub fn from_cartesian(id: LocationIdx, x: f64, y: f64) -> Self {
        Self::new(id, geo::Point::new(x, y))
    }

    pub fn from_lat_lon(id: LocationIdx, lat: f64, lon: f64) -> Self {
        Self::new(id, geo::Point::new(lon, lat))
    }

    pub fn id(&self) -> LocationIdx {
        self.id
    }

    pub fn point(&self) -> geo::Point {
        self.point
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }
}

impl From<&Location> for geo::Point {
    fn from(location: &Location) -> Self {
        location.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_is_stored_as_lon_lat() {
        let location = Location::from_lat_lon(LocationIdx::new(3), 50.85, 4.35);
        assert_eq!(location.x(), 4.35);
        assert_eq!(location.y(), 50.85);
        assert_eq!(location.lat(), 50.85);
        assert_eq!(location.lon(), 4.35);
        assert_eq!(location.id().get(), 3);
    }
}
