use odyssey_routing::geometry::CoordinateSystem;
use thiserror::Error;

use super::location::{Location, LocationIdx};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationSetError {
    #[error("A location set needs at least one location")]
    Empty,
    #[error("Location id {id} appears more than once")]
    DuplicateId { id: LocationIdx },
    #[error("Location id {id} is missing")]
    MissingId { id: LocationIdx },
}

/// The locations of one instance, ordered by id. Ids are exactly `0..len`.
#[derive(Debug, Clone)]
pub struct LocationSet {
    coordinates: CoordinateSystem,
    locations: Vec<Location>,
}

impl LocationSet {
    pub fn new(
        coordinates: CoordinateSystem,
        mut locations: Vec<Location>,
    ) -> Result<Self, LocationSetError> {
        if locations.is_empty() {
            return Err(LocationSetError::Empty);
        }

        locations.sort_by_key(|location| location.id());

        // Sorted, so the first id that differs from its position is either a
        // repeat of the previous id or skips the missing one.
        for (index, location) in locations.iter().enumerate() {
            let id = location.id();
            if id.get() == index {
                continue;
            }

            if index > 0 && locations[index - 1].id() == id {
                return Err(LocationSetError::DuplicateId { id });
            }

            return Err(LocationSetError::MissingId {
                id: LocationIdx::new(index),
            });
        }

        Ok(LocationSet {
            coordinates,
            locations,
        })
    }

    pub fn coordinates(&self) -> CoordinateSystem {
        self.coordinates
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn depot(&self) -> &Location {
        &self.locations[0]
    }

    pub fn location(&self, id: LocationIdx) -> &Location {
        &self.locations[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Points in id order, as consumed by the distance matrix builder.
    pub fn points(&self) -> Vec<geo::Point> {
        self.locations.iter().map(geo::Point::from).collect()
    }
}
