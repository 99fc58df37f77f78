use crate::{
    domain::validator::AssociationValidator,
    parser::{
        error::ParseError,
        structure_parser::{ParseResult, StructureParser},
    },
    structure::structure_model::AssistStructure,
};

pub mod classify;
pub mod cli;
pub mod domain;
pub mod parser;
pub mod service;
pub mod structure;
pub mod trace;

/// Parse `structure` for a fill request: classify its fields and resolve the
/// session identifier.
pub fn parse_for_fill(
    structure: &AssistStructure,
    is_manual: bool,
    validator: &dyn AssociationValidator,
) -> Result<ParseResult, ParseError> {
    StructureParser::new(structure, validator).parse_for_fill(is_manual)
}
