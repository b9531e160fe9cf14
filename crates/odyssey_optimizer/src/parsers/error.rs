use thiserror::Error;

use crate::problem::location_set::LocationSetError;

/// Malformed instance file. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum InputFormatError {
    #[error("Failed to read instance file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Instance file is missing the location count")]
    MissingCount,
    #[error("Line {line}: invalid location count '{value}'")]
    InvalidCount { line: usize, value: String },
    #[error("Expected {expected} locations, found {found}")]
    MissingRow { expected: usize, found: usize },
    #[error("Line {line}: expected 'id x y', found '{content}'")]
    InvalidRow { line: usize, content: String },
    #[error("Line {line}: invalid location id '{value}'")]
    InvalidId { line: usize, value: String },
    #[error("Line {line}: invalid coordinate '{value}'")]
    InvalidCoordinate { line: usize, value: String },
    #[error("Line {line}: location id {id} appears more than once")]
    DuplicateId { line: usize, id: usize },
    #[error("Line {line}: location id {id} is out of range for {count} locations")]
    IdOutOfRange { line: usize, id: usize, count: usize },
    #[error("Line {line}: unexpected content after the last location")]
    TrailingContent { line: usize },
    #[error(transparent)]
    Locations(#[from] LocationSetError),
}
