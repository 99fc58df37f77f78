use autofill_parser::classify::field_model::{FieldMetadataCollection, FieldRole};
use autofill_parser::structure::predicates::EDIT_TEXT_CLASS;
use autofill_parser::structure::structure_model::{AssistStructure, AutofillId, HtmlInfo, InputType, Node};

pub const PACKAGE: &str = "com.example.shop";

pub fn layout(id: u64) -> Node {
    Node::new(id, "android.widget.LinearLayout")
}

pub fn edit_text(id: u64) -> Node {
    Node::new(id, EDIT_TEXT_CLASS).with_input_type(InputType::TYPE_CLASS_TEXT)
}

pub fn password_edit_text(id: u64) -> Node {
    Node::new(id, EDIT_TEXT_CLASS)
        .with_input_type(InputType::TYPE_CLASS_TEXT | InputType::TEXT_VARIATION_PASSWORD)
}

pub fn html_input(id: u64, input_type: &str) -> Node {
    Node::new(id, "android.view.View")
        .with_html(HtmlInfo::new("input").with_attribute("type", input_type))
}

pub fn label(id: u64) -> Node {
    Node::new(id, "android.widget.TextView")
}

/// Single-window structure whose root holds `children`.
pub fn structure_of(children: Vec<Node>) -> AssistStructure {
    let mut root = layout(1000);
    for child in children {
        root = root.with_child(child);
    }
    AssistStructure::new(PACKAGE).with_window(root)
}

/// `(id, role)` pairs in output order.
pub fn roles(fields: &FieldMetadataCollection) -> Vec<(u64, FieldRole)> {
    fields.iter().map(|f| (f.id.0, f.role)).collect()
}

pub fn ids(values: &[u64]) -> Vec<AutofillId> {
    values.iter().map(|v| AutofillId(*v)).collect()
}
