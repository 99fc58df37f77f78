use serde::Serialize;

use crate::structure::structure_model::{AutofillId, Node};

pub const AUTOFILL_HINT_USERNAME: &str = "username";
pub const AUTOFILL_HINT_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldRole {
    Username,
    Password,
    /// Explicit hints carried as-is for the response builder to interpret.
    Hinted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedField {
    pub id: AutofillId,
    pub role: FieldRole,
    pub hints: Vec<String>,
}

impl ClassifiedField {
    pub fn hinted(node: &Node, hints: Vec<String>) -> Self {
        Self {
            id: node.id,
            role: FieldRole::Hinted,
            hints,
        }
    }

    pub fn username(node: &Node) -> Self {
        Self {
            id: node.id,
            role: FieldRole::Username,
            hints: vec![AUTOFILL_HINT_USERNAME.to_string()],
        }
    }

    pub fn password(node: &Node) -> Self {
        Self {
            id: node.id,
            role: FieldRole::Password,
            hints: vec![AUTOFILL_HINT_PASSWORD.to_string()],
        }
    }
}

/// Ordered output of one parse. Does not deduplicate: heuristic pairing can
/// report the same field more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMetadataCollection {
    fields: Vec<ClassifiedField>,
}

impl FieldMetadataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: ClassifiedField) {
        self.fields.push(field);
    }

    pub fn extend(&mut self, other: FieldMetadataCollection) {
        self.fields.extend(other.fields);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.fields.iter()
    }

    /// Distinct handles in first-seen order, for addressing fields when filling.
    pub fn autofill_ids(&self) -> Vec<AutofillId> {
        let mut ids: Vec<AutofillId> = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if !ids.contains(&field.id) {
                ids.push(field.id);
            }
        }
        ids
    }

    pub fn with_role(&self, role: FieldRole) -> Vec<&ClassifiedField> {
        self.fields.iter().filter(|f| f.role == role).collect()
    }
}

impl<'a> IntoIterator for &'a FieldMetadataCollection {
    type Item = &'a ClassifiedField;
    type IntoIter = std::slice::Iter<'a, ClassifiedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autofill_ids_deduplicate_in_first_seen_order() {
        let a = Node::new(1, "android.widget.EditText");
        let b = Node::new(2, "android.widget.EditText");
        let c = Node::new(3, "android.widget.EditText");

        let mut fields = FieldMetadataCollection::new();
        fields.add(ClassifiedField::password(&b));
        fields.add(ClassifiedField::username(&a));
        fields.add(ClassifiedField::password(&c));
        fields.add(ClassifiedField::username(&a));

        assert_eq!(fields.len(), 4);
        assert_eq!(
            fields.autofill_ids(),
            vec![AutofillId(2), AutofillId(1), AutofillId(3)]
        );
        assert_eq!(fields.with_role(FieldRole::Username).len(), 2);
    }
}
