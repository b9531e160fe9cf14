use std::path::Path;

use crate::problem::location_set::LocationSet;

use super::error::InputFormatError;

pub trait DatasetParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<LocationSet, InputFormatError>;
}
