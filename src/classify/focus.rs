use crate::classify::field_model::ClassifiedField;
use crate::structure::predicates::{has_password_hint, is_password_like};
use crate::structure::structure_model::Node;

/// Classify the first focused hint-less field, if any. Later focused fields
/// are ignored.
pub fn focused_field(hintless: &[&Node]) -> Option<ClassifiedField> {
    hintless.iter().find(|node| node.is_focused).map(|node| {
        if is_password_like(node) || has_password_hint(node) {
            ClassifiedField::password(node)
        } else {
            ClassifiedField::username(node)
        }
    })
}
