use std::path::Path;

use fxhash::FxHashSet;
use odyssey_routing::geometry::CoordinateSystem;
use tracing::debug;

use crate::problem::{
    location::{Location, LocationIdx},
    location_set::LocationSet,
};

use super::{error::InputFormatError, parser::DatasetParser};

/// Reads the plain text instance format:
///
/// ```text
/// <n>
/// <id> <x> <y>
/// ...
/// ```
///
/// For geographic coordinates the first value is the latitude and the second
/// the longitude.
pub struct InstanceParser {
    coordinates: CoordinateSystem,
}

impl InstanceParser {
    pub fn new(coordinates: CoordinateSystem) -> Self {
        InstanceParser { coordinates }
    }
}

impl DatasetParser for InstanceParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<LocationSet, InputFormatError> {
        let file_content = std::fs::read_to_string(file)?;
        parse(&file_content, self.coordinates)
    }
}

pub fn parse(text: &str, coordinates: CoordinateSystem) -> Result<LocationSet, InputFormatError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (count_line, count_value) = lines.next().ok_or(InputFormatError::MissingCount)?;
    let count = match count_value.parse::<usize>() {
        Ok(count) if count > 0 => count,
        _ => {
            return Err(InputFormatError::InvalidCount {
                line: count_line,
                value: count_value.to_owned(),
            });
        }
    };

    // Bounded by the text, the header count is untrusted
    let mut locations = Vec::with_capacity(count.min(text.lines().count()));
    let mut seen: FxHashSet<usize> = FxHashSet::default();

    while locations.len() < count {
        let Some((line, content)) = lines.next() else {
            return Err(InputFormatError::MissingRow {
                expected: count,
                found: locations.len(),
            });
        };

        let location = parse_row(line, content, count, coordinates)?;
        if !seen.insert(location.id().get()) {
            return Err(InputFormatError::DuplicateId {
                line,
                id: location.id().get(),
            });
        }

        locations.push(location);
    }

    if let Some((line, _)) = lines.next() {
        return Err(InputFormatError::TrailingContent { line });
    }

    debug!(locations = count, ?coordinates, "Parsed instance");

    Ok(LocationSet::new(coordinates, locations)?)
}

fn parse_row(
    line: usize,
    content: &str,
    count: usize,
    coordinates: CoordinateSystem,
) -> Result<Location, InputFormatError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let [id, first, second] = fields[..] else {
        return Err(InputFormatError::InvalidRow {
            line,
            content: content.to_owned(),
        });
    };

    let id = id.parse::<usize>().map_err(|_| InputFormatError::InvalidId {
        line,
        value: id.to_owned(),
    })?;

    if id >= count {
        return Err(InputFormatError::IdOutOfRange { line, id, count });
    }

    let first = parse_coordinate(line, first)?;
    let second = parse_coordinate(line, second)?;

    let id = LocationIdx::new(id);
    Ok(match coordinates {
        CoordinateSystem::LatLon => Location::from_lat_lon(id, first, second),
        CoordinateSystem::Cartesian => Location::from_cartesian(id, first, second),
    })
}

fn parse_coordinate(line: usize, value: &str) -> Result<f64, InputFormatError> {
    match value.parse::<f64>() {
        Ok(coordinate) if coordinate.is_finite() => Ok(coordinate),
        _ => Err(InputFormatError::InvalidCoordinate {
            line,
            value: value.to_owned(),
        }),
    }
}
