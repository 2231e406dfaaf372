//! Rich-text block structure and annotation extraction.
//!
//! A message's `blocks` is a tree of elements. Only the third level is
//! inspected for annotations:
//!
//! ```text
//! blocks[]            (e.g. "rich_text")
//!   .elements[]       (e.g. "rich_text_section")
//!     .elements[]     leaves: emoji / user / link / text ...
//! ```
//!
//! Deeper nesting (lists inside sections) is not traversed.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ChatstatsError, Result};

/// What a content element is, as far as annotation extraction cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// `{"type": "emoji", "name": ...}`
    Emoji(String),
    /// `{"type": "user", "user_id": ...}`, a mention of another user
    Mention(String),
    /// `{"type": "link", "url": ...}`
    Link(String),
    /// An emoji, user or link element without its payload key.
    Incomplete {
        /// The missing key
        missing: &'static str,
    },
    /// Any other discriminator ("text", "rich_text_section", ...)
    Other(String),
    /// No `type` key at all
    Untyped,
}

/// One node of a block tree.
///
/// Built leniently from any JSON value so that odd nodes never fail the
/// whole file; a non-object node is simply [`ElementKind::Untyped`] with no
/// children.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ContentElement {
    pub kind: ElementKind,
    /// `Some` iff the node has an `elements` key
    pub elements: Option<Vec<ContentElement>>,
}

impl From<Value> for ContentElement {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut obj) => {
                let elements = obj.remove("elements").map(|nested| match nested {
                    Value::Array(items) => items.into_iter().map(ContentElement::from).collect(),
                    _ => Vec::new(),
                });
                ContentElement {
                    kind: element_kind(&obj),
                    elements,
                }
            }
            _ => ContentElement {
                kind: ElementKind::Untyped,
                elements: None,
            },
        }
    }
}

fn element_kind(obj: &Map<String, Value>) -> ElementKind {
    let payload = |key: &'static str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    match obj.get("type") {
        None => ElementKind::Untyped,
        Some(Value::String(kind)) => match kind.as_str() {
            "emoji" => payload("name")
                .map(ElementKind::Emoji)
                .unwrap_or(ElementKind::Incomplete { missing: "name" }),
            "user" => payload("user_id")
                .map(ElementKind::Mention)
                .unwrap_or(ElementKind::Incomplete { missing: "user_id" }),
            "link" => payload("url")
                .map(ElementKind::Link)
                .unwrap_or(ElementKind::Incomplete { missing: "url" }),
            other => ElementKind::Other(other.to_string()),
        },
        Some(other) => ElementKind::Other(other.to_string()),
    }
}

/// Annotations gathered from one message's blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub emojis: Vec<String>,
    pub mentions: Vec<String>,
    pub links: Vec<String>,
}

impl Annotations {
    /// Number of link annotations.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

/// Collects emoji names, mentioned user ids and link URLs from a block tree.
///
/// `index` is the message's position in its batch, used for error reporting.
///
/// # Errors
///
/// Returns [`ChatstatsError::MissingField`] if an inspected emoji, user or
/// link leaf lacks its payload.
pub fn collect_annotations(blocks: &[ContentElement], index: usize) -> Result<Annotations> {
    let mut found = Annotations::default();

    let leaves = blocks
        .iter()
        .filter_map(|block| block.elements.as_deref())
        .flatten()
        .filter_map(|element| element.elements.as_deref())
        .flatten();

    for leaf in leaves {
        match &leaf.kind {
            ElementKind::Emoji(name) => found.emojis.push(name.clone()),
            ElementKind::Mention(user_id) => found.mentions.push(user_id.clone()),
            ElementKind::Link(url) => found.links.push(url.clone()),
            ElementKind::Incomplete { missing } => {
                return Err(ChatstatsError::missing_field(*missing, index));
            }
            ElementKind::Other(_) | ElementKind::Untyped => {}
        }
    }

    Ok(found)
}
