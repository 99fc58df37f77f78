use serde::Serialize;
use tracing::debug;

use crate::classify::field_model::FieldMetadataCollection;
use crate::classify::focus::focused_field;
use crate::classify::heuristics;
use crate::domain::resolver::{SessionIdentifier, resolve};
use crate::domain::validator::AssociationValidator;
use crate::parser::error::ParseError;
use crate::structure::structure_model::AssistStructure;
use crate::structure::walker::TreeWalker;

/// Session key and classified fields of one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub session: SessionIdentifier,
    pub fields: FieldMetadataCollection,
}

/// Classifies the fields of one structure. Holds no state between parses.
pub struct StructureParser<'a> {
    structure: &'a AssistStructure,
    validator: &'a dyn AssociationValidator,
}

impl<'a> StructureParser<'a> {
    pub fn new(structure: &'a AssistStructure, validator: &'a dyn AssociationValidator) -> Self {
        Self {
            structure,
            validator,
        }
    }

    pub fn parse_for_fill(&self, is_manual: bool) -> Result<ParseResult, ParseError> {
        debug!(
            "Parsing structure for {} ({} windows, {} nodes)",
            self.structure.package_name,
            self.structure.windows.len(),
            self.structure.node_count()
        );

        let walk = TreeWalker::walk(self.structure, is_manual)?;
        let mut fields = walk.hinted;

        if fields.is_empty() {
            fields.extend(heuristics::classify(&walk.hintless, is_manual));
        }

        // Lets the user fill fields marked "off", or hint-less fields next to hinted ones.
        if is_manual {
            if let Some(field) = focused_field(&walk.hintless) {
                fields.add(field);
            }
        }

        let session = resolve(
            walk.web_domain.as_deref(),
            &self.structure.package_name,
            self.validator,
        );

        Ok(ParseResult { session, fields })
    }

    pub fn parse_for_save(&self) -> Result<ParseResult, ParseError> {
        Err(ParseError::UnsupportedPath)
    }
}
