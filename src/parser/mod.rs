pub mod error;
pub mod structure_parser;
