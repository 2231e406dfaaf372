//! Table types produced by extraction, and output configuration.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::MessageRow;

/// An ordered table of [`MessageRow`]s with a fixed column set.
///
/// Rows keep the order of the input messages. Tables from several export
/// files are joined with [`append`](MessageTable::append).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MessageTable {
    rows: Vec<MessageRow>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<MessageRow>) -> Self {
        Self { rows }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &'static [&'static str] {
        &MessageRow::COLUMNS
    }

    pub fn push(&mut self, row: MessageRow) {
        self.rows.push(row);
    }

    /// Moves all rows of `other` to the end of this table.
    pub fn append(&mut self, other: MessageTable) {
        self.rows.extend(other.rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MessageRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRow> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<MessageRow> {
        self.rows
    }

    /// The non-null cells of the `text` column.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(MessageRow::text)
    }

    /// The non-null cells of the `ts` column.
    pub fn timestamps(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(MessageRow::ts)
    }
}

impl FromIterator<MessageRow> for MessageTable {
    fn from_iter<I: IntoIterator<Item = MessageRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MessageTable {
    type Item = MessageRow;
    type IntoIter = std::vec::IntoIter<MessageRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageTable {
    type Item = &'a MessageRow;
    type IntoIter = std::slice::Iter<'a, MessageRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// One reply of a thread, lifted out of its root message.
///
/// Carries the verbatim reply entry (typically `user` and `ts`) stamped with
/// the root's `thread_ts` and `client_msg_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyRecord {
    pub thread_ts: String,
    pub message_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ReplyRecord {
    /// Builds a record from a reply entry, letting the stamps win over any
    /// same-named keys in the entry.
    pub fn new(
        thread_ts: impl Into<String>,
        message_id: impl Into<String>,
        mut fields: Map<String, Value>,
    ) -> Self {
        fields.remove("thread_ts");
        fields.remove("message_id");
        Self {
            thread_ts: thread_ts.into(),
            message_id: message_id.into(),
            fields,
        }
    }

    /// The replying user's id, if the entry has one.
    pub fn user(&self) -> Option<&str> {
        self.fields.get("user").and_then(Value::as_str)
    }

    /// The reply's own timestamp, if the entry has one.
    pub fn ts(&self) -> Option<&str> {
        self.fields.get("ts").and_then(Value::as_str)
    }
}

/// Configuration for delimited output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Field delimiter for CSV (default `;`)
    pub delimiter: u8,
    /// Separator used to join list cells (default `,`)
    pub list_separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            list_separator: ",".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }
}
