use tracing::debug;

use crate::classify::field_model::{ClassifiedField, FieldMetadataCollection};
use crate::structure::predicates::{has_password_hint, is_password_like};
use crate::structure::structure_model::Node;

/// Positions in `hintless` that look like password fields.
///
/// The structural signal (input type or HTML `type`) wins; the textual
/// "password" hint is only consulted when nothing structural matched.
pub fn password_positions(hintless: &[&Node]) -> Vec<usize> {
    let structural = positions_matching(hintless, is_password_like);
    if !structural.is_empty() {
        return structural;
    }
    positions_matching(hintless, has_password_hint)
}

fn positions_matching(hintless: &[&Node], predicate: fn(&Node) -> bool) -> Vec<usize> {
    hintless
        .iter()
        .enumerate()
        .filter(|(_, node)| predicate(node))
        .map(|(i, _)| i)
        .collect()
}

/// Infer username/password roles among hint-less fields.
///
/// Every password field is paired with its immediate predecessor in
/// `hintless` as the username. Pairing is per password field, so two
/// password fields in a row report the first one both as a password and as
/// the second one's username.
pub fn classify(hintless: &[&Node], is_manual: bool) -> FieldMetadataCollection {
    let mut fields = FieldMetadataCollection::new();
    let passwords = password_positions(hintless);

    for &pos in &passwords {
        fields.add(ClassifiedField::password(hintless[pos]));
        if let Some(username) = pos.checked_sub(1).map(|prev| hintless[prev]) {
            fields.add(ClassifiedField::username(username));
        }
    }

    // Two-step logins show only the username first.
    if passwords.is_empty() {
        if is_manual && hintless.len() == 1 {
            fields.add(ClassifiedField::username(hintless[0]));
        } else {
            debug!(
                "no password field among {} hint-less fields",
                hintless.len()
            );
        }
    }

    fields
}
