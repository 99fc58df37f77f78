use crate::structure::structure_model::{InputType, Node};

pub const EDIT_TEXT_CLASS: &str = "android.widget.EditText";

const PASSWORD_INPUT_TYPES: [InputType; 3] = [
    InputType::TEXT_VARIATION_PASSWORD,
    InputType::TEXT_VARIATION_VISIBLE_PASSWORD,
    InputType::TEXT_VARIATION_WEB_PASSWORD,
];

fn contains_ignore_case(value: Option<&str>, needle: &str) -> bool {
    value
        .map(|v| v.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Plain text input: a native `EditText` or an HTML `<input>`.
pub fn is_editable_text(node: &Node) -> bool {
    node.class_name == EDIT_TEXT_CLASS || node.html_tag() == Some("input")
}

/// Id entry or hint text mentions "search".
pub fn mentions_search(node: &Node) -> bool {
    contains_ignore_case(node.id_entry.as_deref(), "search")
        || contains_ignore_case(node.hint.as_deref(), "search")
}

pub fn has_password_input_type(node: &Node) -> bool {
    PASSWORD_INPUT_TYPES
        .iter()
        .any(|flag| node.input_type.contains(*flag))
}

/// HTML attribute `type="password"`.
pub fn has_password_html_type(node: &Node) -> bool {
    node.html_info
        .as_ref()
        .map(|html| {
            html.attributes
                .iter()
                .any(|(name, value)| name == "type" && value == "password")
        })
        .unwrap_or(false)
}

/// Structural password signal, suppressed for search boxes.
pub fn is_password_like(node: &Node) -> bool {
    !mentions_search(node) && (has_password_input_type(node) || has_password_html_type(node))
}

/// Weaker textual signal: id entry or hint text mentions "password".
pub fn has_password_hint(node: &Node) -> bool {
    contains_ignore_case(node.id_entry.as_deref(), "password")
        || contains_ignore_case(node.hint.as_deref(), "password")
}
