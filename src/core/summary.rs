//! Thread-level summary projection.
//!
//! A narrower view than [`MessageRow`](crate::MessageRow): just the columns
//! needed to compare thread activity between senders. Every column is
//! required, so this is meant for thread roots.

use serde::Serialize;
use serde_json::Value;

use crate::core::models::ReplyRecord;
use crate::error::{ChatstatsError, Result};
use crate::extractor::replies_from_message;
use crate::parsing::RawMessage;

/// The selected columns of a thread root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    pub client_msg_id: String,
    #[serde(rename = "type")]
    pub msg_type: String,
    pub text: String,
    pub user: String,
    pub ts: String,
    pub team: String,
    pub thread_ts: String,
    pub reply_count: u64,
    pub reply_users_count: u64,
}

/// Projects a message onto [`MessageSummary`] and lifts out its replies.
///
/// # Errors
///
/// Returns [`ChatstatsError::MissingField`] for the first absent column and
/// [`ChatstatsError::InvalidFormat`] for a column of the wrong type
/// (including `null`).
pub fn summarize_message(
    msg: &RawMessage,
    index: usize,
) -> Result<(MessageSummary, Vec<ReplyRecord>)> {
    let text = |value: &Option<Value>, field| string_column(value.as_ref(), field, index);
    let count = |value: &Option<Value>, field| count_column(value.as_ref(), field, index);

    let summary = MessageSummary {
        client_msg_id: text(&msg.client_msg_id, "client_msg_id")?,
        msg_type: text(&msg.msg_type, "type")?,
        text: text(&msg.text, "text")?,
        user: text(&msg.user, "user")?,
        ts: text(&msg.ts, "ts")?,
        team: text(&msg.team, "team")?,
        thread_ts: text(&msg.thread_ts, "thread_ts")?,
        reply_count: count(&msg.reply_count, "reply_count")?,
        reply_users_count: count(&msg.reply_users_count, "reply_users_count")?,
    };

    Ok((summary, replies_from_message(msg)))
}

fn string_column(value: Option<&Value>, field: &'static str, index: usize) -> Result<String> {
    match value {
        None => Err(ChatstatsError::missing_field(field, index)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(field, index, "a string", other)),
    }
}

fn count_column(value: Option<&Value>, field: &'static str, index: usize) -> Result<u64> {
    match value {
        None => Err(ChatstatsError::missing_field(field, index)),
        Some(v) => v.as_u64().ok_or_else(|| wrong_type(field, index, "a count", v)),
    }
}

fn wrong_type(field: &str, index: usize, expected: &str, found: &Value) -> ChatstatsError {
    ChatstatsError::invalid_format(
        "thread summary",
        format!("message #{index}: '{field}' should be {expected}, found {found}"),
    )
}

/// Summarizes every thread root of a batch, skipping system events.
///
/// Returns the summaries and all reply records, both in input order.
pub fn summarize_threads(messages: &[RawMessage]) -> Result<(Vec<MessageSummary>, Vec<ReplyRecord>)> {
    let mut summaries = Vec::new();
    let mut replies = Vec::new();

    for (index, msg) in messages.iter().enumerate() {
        if msg.is_system_event() || !msg.is_thread_root() {
            continue;
        }
        let (summary, mut records) = summarize_message(msg, index)?;
        summaries.push(summary);
        replies.append(&mut records);
    }

    Ok((summaries, replies))
}
