//! The flattened message row.
//!
//! [`MessageRow`] is one row of the table produced by the extractor. Every
//! row has the same columns; an absent value is `None` (serialized as
//! `null`), never a missing key. That includes `text`, `user` and `ts`,
//! which the export may carry as an explicit `null`.
//!
//! # Example
//!
//! ```
//! use chatstats::MessageRow;
//!
//! let row = MessageRow::new("U1", "hi", "100").with_msg_id("m1");
//! assert_eq!(row.user(), Some("U1"));
//! assert_eq!(row.link_count, 0);
//!
//! let json = serde_json::to_string(&row)?;
//! assert!(json.contains(r#""reactions":null"#));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::time::parse_unix_ts;

/// One eligible message, flattened.
///
/// Field order is the column order of every output format.
///
/// | Field | Derivation |
/// |-------|------------|
/// | `msg_id` | `client_msg_id`, if present |
/// | `text` | message text, `None` if the export has `null` |
/// | `attachments` | reserved, always `None` |
/// | `user` | author id, `None` if the export has `null` |
/// | `mentions` | user ids mentioned in blocks |
/// | `emojis` | emoji names used in blocks |
/// | `reactions` | verbatim `reactions` |
/// | `replies` | verbatim `replies`, thread roots only |
/// | `replies_to` | the message's **own** `ts`, replies only |
/// | `ts` | message timestamp, `None` if the export has `null` |
/// | `links` | URLs linked in blocks |
/// | `link_count` | number of links, 0 without blocks |
///
/// `mentions`, `emojis` and `links` are all `Some` or all `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    pub msg_id: Option<String>,
    pub text: Option<String>,
    pub attachments: Option<Value>,
    pub user: Option<String>,
    pub mentions: Option<Vec<String>>,
    pub emojis: Option<Vec<String>>,
    pub reactions: Option<Value>,
    pub replies: Option<Value>,
    /// Marks the message as a thread reply. This holds the reply's own
    /// timestamp, not its parent's; join against the reply table to find
    /// the thread.
    pub replies_to: Option<String>,
    pub ts: Option<String>,
    pub links: Option<Vec<String>>,
    pub link_count: usize,
}

impl MessageRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 12] = [
        "msg_id",
        "text",
        "attachments",
        "user",
        "mentions",
        "emojis",
        "reactions",
        "replies",
        "replies_to",
        "ts",
        "links",
        "link_count",
    ];

    /// Creates a row with only the required fields; everything else is absent.
    pub fn new(user: impl Into<String>, text: impl Into<String>, ts: impl Into<String>) -> Self {
        Self::from_cells(Some(user.into()), Some(text.into()), Some(ts.into()))
    }

    /// Like [`new`](MessageRow::new), for cells that may be `null`.
    pub fn from_cells(user: Option<String>, text: Option<String>, ts: Option<String>) -> Self {
        Self {
            msg_id: None,
            text,
            attachments: None,
            user,
            mentions: None,
            emojis: None,
            reactions: None,
            replies: None,
            replies_to: None,
            ts,
            links: None,
            link_count: 0,
        }
    }

    #[must_use]
    pub fn with_msg_id(mut self, id: impl Into<String>) -> Self {
        self.msg_id = Some(id.into());
        self
    }

    /// Sets the three annotation columns and the link count together.
    #[must_use]
    pub fn with_annotations(
        mut self,
        mentions: Vec<String>,
        emojis: Vec<String>,
        links: Vec<String>,
    ) -> Self {
        self.link_count = links.len();
        self.mentions = Some(mentions);
        self.emojis = Some(emojis);
        self.links = Some(links);
        self
    }

    #[must_use]
    pub fn with_reactions(mut self, reactions: Value) -> Self {
        self.reactions = Some(reactions);
        self
    }

    #[must_use]
    pub fn with_replies(mut self, replies: Value) -> Self {
        self.replies = Some(replies);
        self
    }

    /// Marks the row as a thread reply, stamping its own `ts`.
    ///
    /// A reply whose `ts` is `null` keeps `replies_to` empty as well.
    #[must_use]
    pub fn as_reply(mut self) -> Self {
        self.replies_to = self.ts.clone();
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn ts(&self) -> Option<&str> {
        self.ts.as_deref()
    }

    /// Parsed message time, if `ts` is a valid unix-seconds string.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.ts.as_deref().and_then(parse_unix_ts)
    }

    /// Returns `true` if the row's blocks were present.
    pub fn has_annotations(&self) -> bool {
        self.links.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.replies_to.is_some()
    }

    pub fn is_thread_root(&self) -> bool {
        self.replies.is_some()
    }

    /// User ids of the entries in `replies`, skipping entries without one.
    pub fn reply_users(&self) -> impl Iterator<Item = &str> {
        self.replies
            .as_ref()
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|reply| reply.get("user").and_then(Value::as_str))
    }
}
