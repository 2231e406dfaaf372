//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - delimited table, `;` by default - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON array - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//!
//! The JSON writers take any serializable slice, so the same functions write
//! both [`MessageRow`](crate::MessageRow)s and
//! [`ReplyRecord`](crate::core::models::ReplyRecord)s. CSV has a dedicated
//! pair for replies ([`write_replies_csv`] / [`replies_to_csv`]).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::output::{to_csv, write_json, write_jsonl};
//! use chatstats::core::models::{MessageTable, OutputConfig};
//! use chatstats::MessageRow;
//!
//! let table = MessageTable::from_rows(vec![
//!     MessageRow::new("U1", "Hello!", "1700000000.000100"),
//!     MessageRow::new("U2", "Hi there!", "1700000001.000200"),
//! ]);
//!
//! write_json(table.rows(), "messages.json")?;
//! write_jsonl(table.rows(), "messages.jsonl")?;
//! let csv = to_csv(&table, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{replies_to_csv, to_csv, write_csv, write_replies_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
