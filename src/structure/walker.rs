use tracing::debug;

use crate::classify::field_model::{ClassifiedField, FieldMetadataCollection};
use crate::parser::error::ParseError;
use crate::structure::predicates::is_editable_text;
use crate::structure::structure_model::{AssistStructure, Node};

pub const HINT_OFF: &str = "off";
pub const HINT_ON: &str = "on";

/// Result of one pass over a structure.
#[derive(Debug)]
pub struct WalkOutcome<'a> {
    pub hinted: FieldMetadataCollection,
    /// Editable fields without a usable hint, in pre-order across all windows.
    pub hintless: Vec<&'a Node>,
    pub web_domain: Option<String>,
}

/// Pre-order walk that partitions nodes into hinted and hint-less buckets.
pub struct TreeWalker<'a> {
    is_manual: bool,
    valid_domain: Option<String>,
    hinted: FieldMetadataCollection,
    hintless: Vec<&'a Node>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(is_manual: bool) -> Self {
        Self {
            is_manual,
            valid_domain: None,
            hinted: FieldMetadataCollection::new(),
            hintless: Vec::new(),
        }
    }

    pub fn walk(structure: &'a AssistStructure, is_manual: bool) -> Result<WalkOutcome<'a>, ParseError> {
        let mut walker = Self::new(is_manual);
        for window in &structure.windows {
            walker.visit(&window.root)?;
        }
        Ok(walker.finish())
    }

    fn finish(self) -> WalkOutcome<'a> {
        WalkOutcome {
            hinted: self.hinted,
            hintless: self.hintless,
            web_domain: self.valid_domain,
        }
    }

    fn visit(&mut self, node: &'a Node) -> Result<(), ParseError> {
        self.check_web_domain(node)?;

        let view_hints = effective_hints(node, self.is_manual);
        debug!(
            hints = ?view_hints,
            class = %node.class_name,
            tag = node.html_tag().unwrap_or("(null)"),
            "visiting node {}",
            node.id
        );
        if let Some(html) = node.html_info.as_ref().filter(|h| h.tag == "input") {
            for (name, value) in &html.attributes {
                debug!("attr={}/{}", name, value);
            }
        }

        // A lone "on" carries no role information.
        let has_usable_hint = view_hints.first().is_some_and(|h| h != HINT_ON);
        if has_usable_hint {
            self.hinted.add(ClassifiedField::hinted(node, view_hints));
        } else if is_editable_text(node) {
            self.hintless.push(node);
        }

        for child in &node.children {
            self.visit(child)?;
        }
        Ok(())
    }

    fn check_web_domain(&mut self, node: &Node) -> Result<(), ParseError> {
        let Some(domain) = node.web_domain.as_deref().filter(|d| !d.is_empty()) else {
            return Ok(());
        };
        debug!("child web domain: {}", domain);

        if let Some(valid) = &self.valid_domain {
            if valid == domain {
                return Err(ParseError::DomainConflict {
                    valid: valid.clone(),
                    child: domain.to_string(),
                });
            }
            return Ok(());
        }

        self.valid_domain = Some(domain.to_string());
        Ok(())
    }
}

/// Hints of `node`, with a lone `"off"` on a focused field of a manual
/// request rewritten to `"on"`.
pub fn effective_hints(node: &Node, is_manual: bool) -> Vec<String> {
    let mut hints = node.autofill_hints.clone();
    if is_manual && node.is_focused && hints.len() == 1 && hints[0] == HINT_OFF {
        hints[0] = HINT_ON.to_string();
    }
    hints
}
