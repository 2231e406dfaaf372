//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - `clap`-aware output format, converts into
//!   [`format::OutputFormat`](crate::format::OutputFormat)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Flatten a chat workspace channel export into one message table,
/// with optional thread replies and per-user activity statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats export/general
    chatstats export/general -o general.jsonl -f jsonl
    chatstats export/general --after 2024-01-01 --user U024BE7LH
    chatstats export/general --stats --users export/users.json --top 5
    chatstats export/general --replies-out replies.json --skip-incomplete")]
pub struct Args {
    /// Channel directory holding the daily export files
    pub channel_dir: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = "messages.csv")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Only read files with this extension
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Skip messages lacking text, user or ts instead of failing
    #[arg(long)]
    pub skip_incomplete: bool,

    /// Keep messages on or after this date (YYYY-MM-DD, UTC)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD, UTC)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages written by this user id
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Users export used to show real names in statistics
    #[arg(long, value_name = "PATH")]
    pub users: Option<PathBuf>,

    /// Print per-user activity statistics
    #[arg(long)]
    pub stats: bool,

    /// Entries per statistics category
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Also write thread replies here (format from the extension)
    #[arg(long, value_name = "PATH")]
    pub replies_out: Option<PathBuf>,

    /// Verbose logging to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited table, `;` separated (default)
    #[default]
    Csv,

    /// Pretty JSON array
    Json,

    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
