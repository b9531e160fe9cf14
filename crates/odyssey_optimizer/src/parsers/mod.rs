pub mod error;
pub mod instance_parser;
pub mod parser;
