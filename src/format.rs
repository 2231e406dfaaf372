//! Output format selection.
//!
//! [`OutputFormat`] is the library-side format enum; the CLI has its own
//! `clap`-aware twin that converts into it.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatstats::Result<()> {
//! use chatstats::format::{OutputFormat, write_to_format};
//! use chatstats::core::models::{MessageTable, OutputConfig};
//! use chatstats::MessageRow;
//!
//! let table = MessageTable::from_rows(vec![MessageRow::new("U1", "Hello!", "1")]);
//!
//! let format = OutputFormat::from_path("messages.jsonl".as_ref())?;
//! write_to_format(&table, "messages.jsonl", format, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::{MessageTable, OutputConfig, ReplyRecord};
use crate::error::{ChatstatsError, Result};

/// Output format for extracted tables.
///
/// ```rust
/// use chatstats::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Delimited table, `;` by default
    #[default]
    Csv,

    /// Pretty-printed JSON array of records
    Json,

    /// One JSON object per line (NDJSON)
    Jsonl,
}

impl OutputFormat {
    /// File extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatstatsError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }

    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    #[cfg_attr(all(feature = "csv-output", feature = "json-output"), allow(dead_code))]
    fn disabled(self) -> ChatstatsError {
        ChatstatsError::invalid_format(
            "output",
            format!(
                "Output format {self} requires the '{}' feature to be enabled",
                self.required_feature()
            ),
        )
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes a message table to `path` in the given format.
///
/// # Errors
///
/// Fails if the format's feature is disabled or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    table: &MessageTable,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(table, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(table.rows(), path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(table.rows(), path),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

/// Renders a message table as a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(table: &MessageTable, format: OutputFormat, config: &OutputConfig) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(table, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(table.rows()),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(table.rows()),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

/// Writes reply records to `path` in the given format.
#[allow(unused_variables)]
pub fn write_replies_to_format(
    replies: &[ReplyRecord],
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_replies_csv(replies, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(replies, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(replies, path),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}
