//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Writes records to a JSON file as a pretty-printed array.
///
/// Works for message rows as well as reply records. Absent values are
/// written as `null`; no key is ever omitted.
///
/// # Format
/// ```json
/// [
///   {"msg_id": "m1", "text": "Hello", "attachments": null, "user": "U1", ...},
///   {"msg_id": null, "text": "Hi", "attachments": null, "user": "U2", ...}
/// ]
/// ```
pub fn write_json<T: Serialize>(records: &[T], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Same as [`write_json`], returned as a string.
pub fn to_json<T: Serialize>(records: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
