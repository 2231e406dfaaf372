//! Raw message records as they appear in a channel export file.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::blocks::ContentElement;
use crate::error::{ChatstatsError, Result};

/// One record of a channel export file.
///
/// Export records vary a lot in shape: system events, bot posts, thread
/// roots and replies all share the same file. Every key is therefore
/// optional here and the extractor decides which absences are fatal.
///
/// Keys are kept as `Option<Value>`: `None` means the key is absent and an
/// explicit `null` still counts as present. Values are only interpreted
/// when a row or summary is built, so an oddly typed field never fails the
/// whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    /// Present on non-content events (joins, topic changes, bot posts...)
    #[serde(default, deserialize_with = "present")]
    pub subtype: Option<Value>,

    /// Client-generated message id
    #[serde(default, deserialize_with = "present")]
    pub client_msg_id: Option<Value>,

    /// Record type, usually "message"
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub msg_type: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub text: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub ts: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub team: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub reactions: Option<Value>,

    /// Set on messages posted inside a thread
    #[serde(default, deserialize_with = "present")]
    pub parent_user_id: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub thread_ts: Option<Value>,

    /// Set on thread roots only
    #[serde(default, deserialize_with = "present")]
    pub reply_users: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub replies: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub reply_count: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub reply_users_count: Option<Value>,

    /// Rich-text block structure
    #[serde(default, deserialize_with = "block_list")]
    pub blocks: Option<Vec<ContentElement>>,
}

/// Maps a present key to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A `blocks` value that is not a list has no elements to inspect.
fn block_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<ContentElement>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(ContentElement::from).collect()),
        Value::Null => None,
        _ => Some(Vec::new()),
    })
}

impl RawMessage {
    /// Returns `true` for system events that carry a `subtype`.
    pub fn is_system_event(&self) -> bool {
        self.subtype.is_some()
    }

    /// Returns `true` if this message was posted as a reply inside a thread.
    pub fn is_reply(&self) -> bool {
        self.parent_user_id.is_some()
    }

    /// Returns `true` if this message started a thread.
    pub fn is_thread_root(&self) -> bool {
        self.thread_ts.is_some() && self.reply_users.is_some()
    }

    pub fn client_msg_id(&self) -> Option<&str> {
        self.client_msg_id.as_ref().and_then(Value::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_ref().and_then(Value::as_str)
    }

    pub fn ts(&self) -> Option<&str> {
        self.ts.as_ref().and_then(Value::as_str)
    }
}

/// Parses one export file's content: a JSON array of message records.
///
/// # Errors
///
/// Returns [`ChatstatsError::Parse`] if the content is not a JSON array of
/// objects.
pub fn parse_batch_str(content: &str) -> Result<Vec<RawMessage>> {
    serde_json::from_str(content).map_err(|e| ChatstatsError::channel_parse(e, None))
}
