//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::MessageRow;
use crate::core::models::{MessageTable, OutputConfig, ReplyRecord};
use crate::error::{ChatstatsError, Result};

/// Writes a message table to CSV.
///
/// # Format
/// - Delimiter: `config.delimiter` (`;` by default)
/// - Header: every column of [`MessageRow::COLUMNS`], in order
/// - Absent values: empty cells
/// - `mentions`, `emojis`, `links`: joined with `config.list_separator`
/// - `attachments`, `reactions`, `replies`: compact JSON
pub fn write_csv(table: &MessageTable, output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(table, file, config)
}

/// Same as [`write_csv`], returned as a string.
pub fn to_csv(table: &MessageTable, config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_rows(table, &mut buf, config)?;
    String::from_utf8(buf).map_err(ChatstatsError::from)
}

fn write_rows<W: Write>(table: &MessageTable, out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(out);

    writer.write_record(MessageRow::COLUMNS)?;
    for row in table {
        writer.write_record(build_record(row, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(row: &MessageRow, config: &OutputConfig) -> [String; 12] {
    let list = |cell: &Option<Vec<String>>| {
        cell.as_ref()
            .map(|items| items.join(&config.list_separator))
            .unwrap_or_default()
    };

    [
        row.msg_id.clone().unwrap_or_default(),
        row.text.clone().unwrap_or_default(),
        json_cell(row.attachments.as_ref()),
        row.user.clone().unwrap_or_default(),
        list(&row.mentions),
        list(&row.emojis),
        json_cell(row.reactions.as_ref()),
        json_cell(row.replies.as_ref()),
        row.replies_to.clone().unwrap_or_default(),
        row.ts.clone().unwrap_or_default(),
        list(&row.links),
        row.link_count.to_string(),
    ]
}

fn json_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Writes reply records to CSV.
///
/// The header is `thread_ts`, `message_id`, then every other key seen in the
/// records in first-seen order; a record lacking a key gets an empty cell.
pub fn write_replies_csv(
    replies: &[ReplyRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_reply_rows(replies, file, config)
}

/// Same as [`write_replies_csv`], returned as a string.
pub fn replies_to_csv(replies: &[ReplyRecord], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_reply_rows(replies, &mut buf, config)?;
    String::from_utf8(buf).map_err(ChatstatsError::from)
}

fn write_reply_rows<W: Write>(replies: &[ReplyRecord], out: W, config: &OutputConfig) -> Result<()> {
    let mut extra: Vec<&str> = Vec::new();
    for record in replies {
        for key in record.fields.keys() {
            if !extra.contains(&key.as_str()) {
                extra.push(key);
            }
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(out);

    let mut header = vec!["thread_ts", "message_id"];
    header.extend(&extra);
    writer.write_record(&header)?;

    for record in replies {
        let mut cells = vec![record.thread_ts.clone(), record.message_id.clone()];
        cells.extend(extra.iter().map(|key| json_cell(record.fields.get(*key))));
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(())
}
