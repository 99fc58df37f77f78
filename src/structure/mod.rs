pub mod predicates;
pub mod structure_model;
pub mod walker;
