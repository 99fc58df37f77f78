use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Opaque handle used to address a field when filling values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutofillId(pub u64);

impl std::fmt::Display for AutofillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Android `InputType` bitset as reported on a view node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputType(pub u32);

impl InputType {
    pub const NONE: InputType = InputType(0);
    pub const TYPE_CLASS_TEXT: InputType = InputType(0x0000_0001);
    pub const TEXT_VARIATION_PASSWORD: InputType = InputType(0x0000_0080);
    pub const TEXT_VARIATION_VISIBLE_PASSWORD: InputType = InputType(0x0000_0090);
    pub const TEXT_VARIATION_WEB_PASSWORD: InputType = InputType(0x0000_00e0);

    pub fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `flag` is set.
    pub fn contains(self, flag: InputType) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for InputType {
    type Output = InputType;

    fn bitor(self, rhs: InputType) -> InputType {
        InputType(self.0 | rhs.0)
    }
}

/// HTML-like metadata attached to nodes rendered from web content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlInfo {
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
}

impl HtmlInfo {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: vec![],
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One element of the view hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: AutofillId,
    pub id_entry: Option<String>,
    pub hint: Option<String>,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub input_type: InputType,
    pub html_info: Option<HtmlInfo>,
    #[serde(default)]
    pub autofill_hints: Vec<String>,
    #[serde(default)]
    pub is_focused: bool,
    pub web_domain: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: u64, class_name: &str) -> Self {
        Self {
            id: AutofillId(id),
            id_entry: None,
            hint: None,
            class_name: class_name.to_string(),
            input_type: InputType::NONE,
            html_info: None,
            autofill_hints: vec![],
            is_focused: false,
            web_domain: None,
            children: vec![],
        }
    }

    pub fn with_id_entry(mut self, id_entry: &str) -> Self {
        self.id_entry = Some(id_entry.to_string());
        self
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_html(mut self, html: HtmlInfo) -> Self {
        self.html_info = Some(html);
        self
    }

    pub fn with_autofill_hints(mut self, hints: &[&str]) -> Self {
        self.autofill_hints = hints.iter().map(|h| h.to_string()).collect();
        self
    }

    pub fn focused(mut self) -> Self {
        self.is_focused = true;
        self
    }

    pub fn with_web_domain(mut self, domain: &str) -> Self {
        self.web_domain = Some(domain.to_string());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn html_tag(&self) -> Option<&str> {
        self.html_info.as_ref().map(|h| h.tag.as_str())
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// Top-level root of a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub root: Node,
}

/// Snapshot of an application's visible UI for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistStructure {
    pub package_name: String,
    #[serde(default)]
    pub windows: Vec<Window>,
}

impl AssistStructure {
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            windows: vec![],
        }
    }

    pub fn with_window(mut self, root: Node) -> Self {
        self.windows.push(Window { root });
        self
    }

    pub fn node_count(&self) -> usize {
        self.windows.iter().map(|w| w.root.subtree_len()).sum()
    }

    /// SHA-1 over the canonical JSON form, used to correlate trace events.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let json = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha1::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
