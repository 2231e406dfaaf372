//! Message extraction: raw export records in, flat [`MessageRow`]s out.
//!
//! # Example
//!
//! ```rust
//! use chatstats::extractor::extract;
//! use chatstats::parsing::parse_batch_str;
//!
//! # fn main() -> chatstats::Result<()> {
//! let batch = parse_batch_str(r#"[
//!     {"text": "hi", "user": "U1", "ts": "100", "client_msg_id": "m1"},
//!     {"subtype": "channel_join", "user": "U2", "text": "joined", "ts": "101"}
//! ]"#)?;
//!
//! let table = extract(&batch)?;
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.rows()[0].msg_id.as_deref(), Some("m1"));
//! # Ok(())
//! # }
//! ```
//!
//! Reading a whole channel directory:
//!
//! ```rust,no_run
//! use chatstats::extractor::read_channel;
//!
//! let table = read_channel("export/general".as_ref())?;
//! println!("{} messages", table.len());
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::MessageRow;
use crate::config::{ChannelConfig, ExtractConfig};
use crate::core::models::{MessageTable, ReplyRecord};
use crate::core::summary::{MessageSummary, summarize_threads};
use crate::error::{ChatstatsError, Result};
use crate::parsing::{RawMessage, collect_annotations, parse_batch_str};

/// Extracts one row per content message, in input order.
///
/// Messages with a `subtype` are skipped. A content message without a
/// `text`, `user` or `ts` key fails the whole batch; see
/// [`extract_with_config`] to skip such messages instead. A key that is
/// present with a `null` value gives a `None` cell.
pub fn extract(messages: &[RawMessage]) -> Result<MessageTable> {
    extract_with_config(messages, &ExtractConfig::default())
}

/// Like [`extract`], with control over incomplete messages.
pub fn extract_with_config(messages: &[RawMessage], config: &ExtractConfig) -> Result<MessageTable> {
    let mut table = MessageTable::new();

    for (index, msg) in messages.iter().enumerate() {
        match extract_row(msg, index) {
            Ok(Some(row)) => table.push(row),
            Ok(None) => {}
            Err(ChatstatsError::MissingField { field, .. }) if config.skip_incomplete => {
                warn!(index, field, "skipping message without required field");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(table)
}

/// Flattens a single message. Returns `Ok(None)` for system events.
///
/// `index` is only used to locate the message in error reports.
pub fn extract_row(msg: &RawMessage, index: usize) -> Result<Option<MessageRow>> {
    if let Some(subtype) = &msg.subtype {
        debug!(index, %subtype, "skipping system event");
        return Ok(None);
    }

    let text = required(msg.text.as_ref(), "text", index)?;
    let user = required(msg.user.as_ref(), "user", index)?;
    let ts = required(msg.ts.as_ref(), "ts", index)?;

    let mut row = MessageRow::from_cells(user, text, ts);
    row.msg_id = msg.client_msg_id.as_ref().and_then(cell);
    row.reactions = non_null(msg.reactions.as_ref());

    if msg.is_reply() {
        row = row.as_reply();
    }
    if msg.is_thread_root() {
        row.replies = non_null(msg.replies.as_ref());
    }

    if let Some(blocks) = &msg.blocks {
        let found = collect_annotations(blocks, index)?;
        row = row.with_annotations(found.mentions, found.emojis, found.links);
    }

    Ok(Some(row))
}

/// Only an absent key is missing; a `null` value is an empty cell.
fn required(value: Option<&Value>, field: &'static str, index: usize) -> Result<Option<String>> {
    value
        .map(cell)
        .ok_or_else(|| ChatstatsError::missing_field(field, index))
}

/// Text of a scalar cell. Non-string values keep their JSON spelling.
fn cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

/// Lifts the replies of a thread root out into standalone records.
///
/// Needs both `thread_ts` and `replies`. Each reply entry is stamped with
/// the root's `thread_ts` and `client_msg_id`. Any structural surprise
/// (replies not a list, an entry not an object, no `client_msg_id` on the
/// root) yields an empty list for this message only.
pub fn replies_from_message(msg: &RawMessage) -> Vec<ReplyRecord> {
    let (Some(thread_ts), Some(replies)) = (&msg.thread_ts, &msg.replies) else {
        return Vec::new();
    };

    stamp_replies(thread_ts, replies, msg.client_msg_id()).unwrap_or_else(|| {
        debug!(thread_ts = %thread_ts, "malformed reply structure, no replies extracted");
        Vec::new()
    })
}

fn stamp_replies(
    thread_ts: &Value,
    replies: &Value,
    message_id: Option<&str>,
) -> Option<Vec<ReplyRecord>> {
    let entries = replies.as_array()?;
    if entries.is_empty() {
        return Some(Vec::new());
    }

    let thread_ts = thread_ts.as_str()?;
    let message_id = message_id?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_object()
                .map(|fields| ReplyRecord::new(thread_ts, message_id, fields.clone()))
        })
        .collect()
}

/// Reply records of every message in a batch, in order.
pub fn extract_replies(messages: &[RawMessage]) -> Vec<ReplyRecord> {
    messages.iter().flat_map(replies_from_message).collect()
}

// =============================================================================
// Channel directories
// =============================================================================

/// The messages of one export file.
#[derive(Debug, Clone)]
pub struct ChannelBatch {
    pub path: PathBuf,
    pub messages: Vec<RawMessage>,
}

impl ChannelBatch {
    /// Extracts this batch, tagging errors with the file path.
    pub fn extract(&self, config: &ExtractConfig) -> Result<MessageTable> {
        extract_with_config(&self.messages, config).map_err(|e| e.with_path(&self.path))
    }

    /// Summarizes this batch's thread roots, tagging errors with the file path.
    pub fn summarize(&self) -> Result<(Vec<MessageSummary>, Vec<ReplyRecord>)> {
        summarize_threads(&self.messages).map_err(|e| match e {
            ChatstatsError::InvalidFormat { format, message } => ChatstatsError::invalid_format(
                format,
                format!("{message} (file: {})", self.path.display()),
            ),
            other => other.with_path(&self.path),
        })
    }
}

/// Reader for channel directories: one directory per channel, one JSON
/// array of messages per file.
///
/// Files are read in file-name order so results are reproducible.
#[derive(Debug, Clone, Default)]
pub struct ChannelReader {
    config: ChannelConfig,
}

impl ChannelReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChannelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Loads every accepted file in `dir` without extracting.
    pub fn load(&self, dir: &Path) -> Result<Vec<ChannelBatch>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.config.accepts(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| -> Result<ChannelBatch> {
                let messages = read_channel_file(&path)?;
                debug!(file = %path.display(), messages = messages.len(), "loaded export file");
                Ok(ChannelBatch { path, messages })
            })
            .collect()
    }

    /// Reads and extracts a whole channel into one table.
    pub fn read(&self, dir: &Path) -> Result<MessageTable> {
        let batches = self.load(dir)?;
        let table = self.extract_batches(&batches)?;
        info!(
            channel = %dir.display(),
            files = batches.len(),
            messages = table.len(),
            "Number of messages in channel: {}",
            table.len()
        );
        Ok(table)
    }

    /// Extracts and concatenates already-loaded batches.
    pub fn extract_batches(&self, batches: &[ChannelBatch]) -> Result<MessageTable> {
        let mut table = MessageTable::new();
        for batch in batches {
            table.append(batch.extract(&self.config.extract)?);
        }
        Ok(table)
    }

    /// Extracts a single export file's content.
    pub fn parse_str(&self, content: &str) -> Result<MessageTable> {
        extract_with_config(&parse_batch_str(content)?, &self.config.extract)
    }
}

/// Reads one export file into raw messages.
pub fn read_channel_file(path: &Path) -> Result<Vec<RawMessage>> {
    let content = fs::read_to_string(path)?;
    parse_batch_str(&content).map_err(|e| e.with_path(path))
}

/// Reads every file of a channel directory into one table.
pub fn read_channel(dir: &Path) -> Result<MessageTable> {
    ChannelReader::new().read(dir)
}

/// [`read_channel`] with explicit configuration.
pub fn read_channel_with_config(dir: &Path, config: &ChannelConfig) -> Result<MessageTable> {
    ChannelReader::with_config(config.clone()).read(dir)
}
