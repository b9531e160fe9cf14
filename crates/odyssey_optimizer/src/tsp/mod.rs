pub mod arc_arena;
pub mod solution_extractor;
pub mod tour;
pub mod tsp_model;
