use odyssey_routing::error::RoutingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    /// Location `to` cannot be reached from location `from`.
    #[error("No path from location {from} to location {to}")]
    NoPath { from: usize, to: usize },
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error("Failed to create the matrix thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Distance matrix is not square: expected {expected} entries, found {found}")]
    NotSquare { expected: usize, found: usize },
    #[error("Invalid distance {value} from location {from} to location {to}")]
    InvalidDistance { from: usize, to: usize, value: f64 },
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache folder is not configured: {0}")]
    MissingFolder(#[from] std::env::VarError),
    #[error("Path {0} is not a directory")]
    NotADirectory(String),
    #[error("Failed to access cache file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to (de)serialize cached matrix: {0}")]
    Json(#[from] serde_json::Error),
}
