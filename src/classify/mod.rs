pub mod field_model;
pub mod focus;
pub mod heuristics;
