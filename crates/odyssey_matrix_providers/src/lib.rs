pub mod cache;
pub mod distance_matrix;
pub mod error;
pub mod matrix_builder;
pub mod matrix_params;
