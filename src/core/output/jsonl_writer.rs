//! JSON Lines (JSONL) output writer.
//!
//! One object per line, handy for loading into dataframes or streaming
//! through line-oriented tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Writes records to a JSONL file, one compact object per line.
pub fn write_jsonl<T: Serialize>(records: &[T], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Same as [`write_jsonl`], returned as a string.
pub fn to_jsonl<T: Serialize>(records: &[T]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}
