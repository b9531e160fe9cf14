pub(crate) const DEFAULT_SPEED_KMH: f64 = 50.0;

pub(crate) const KMH_TO_METERS_PER_SECOND: f64 = 1000.0 / 3600.0;
