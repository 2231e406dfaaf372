//! Core processing on extracted tables.
//!
//! - [`models`] - [`MessageTable`], [`ReplyRecord`] and [`OutputConfig`]
//! - [`filter`] - row filtering by date and author
//! - [`stats`] - per-user activity counters
//! - [`summary`] - thread-root summaries
//! - [`output`] - format writers (CSV, JSON, JSONL)

pub mod filter;
pub mod models;
pub mod output;
pub mod stats;
pub mod summary;

pub use filter::{FilterConfig, apply_filters};
pub use models::{MessageTable, OutputConfig, ReplyRecord};
pub use stats::{ActivityStats, SummaryMetric, UserCounts, tagged_users, top_n};
pub use summary::{MessageSummary, summarize_message, summarize_threads};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
