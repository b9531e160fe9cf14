pub mod error;
pub mod milp;
pub mod parsers;
pub mod problem;
pub mod solver;
pub mod tsp;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
