pub mod location;
pub mod location_set;
