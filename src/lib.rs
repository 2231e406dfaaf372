//! # Chatstats
//!
//! A Rust library for flattening chat workspace channel exports into tabular
//! message records and computing per-user activity statistics.
//!
//! ## Overview
//!
//! A workspace export holds one directory per channel; each file in it is a
//! JSON array of message objects. Chatstats reads those files and produces:
//!
//! - a [`MessageTable`](core::MessageTable): one [`MessageRow`] per content
//!   message, with mentions, emojis and links pulled out of the rich-text
//!   blocks
//! - a reply table: one [`ReplyRecord`](core::ReplyRecord) per thread reply,
//!   stamped with its thread's `thread_ts` and root message id
//! - [`ActivityStats`](core::ActivityStats): messages, replies, mentions and
//!   links per user
//!
//! Messages with a `subtype` (joins, bot posts, channel events) are skipped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let table = read_channel("export/general".as_ref())?;
//!
//!     let stats = ActivityStats::from_table(&table);
//!     for (user, count) in top_n(&stats.messages, 5) {
//!         println!("{user}: {count}");
//!     }
//!
//!     write_json(table.rows(), "general.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Extracting One Batch
//!
//! ```rust
//! use chatstats::extractor::{extract, extract_replies};
//! use chatstats::parsing::parse_batch_str;
//!
//! let batch = parse_batch_str(r#"[
//!     {"client_msg_id": "m1", "text": "lunch?", "user": "U1", "ts": "1700000000.000100",
//!      "thread_ts": "1700000000.000100", "reply_users": ["U2"],
//!      "replies": [{"user": "U2", "ts": "1700000060.000200"}]},
//!     {"subtype": "channel_join", "user": "U3", "text": "joined", "ts": "1700000001.000000"}
//! ]"#)?;
//!
//! let table = extract(&batch)?;
//! assert_eq!(table.len(), 1);
//!
//! let replies = extract_replies(&batch);
//! assert_eq!(replies[0].message_id, "m1");
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`]: raw export records ([`RawMessage`](parsing::RawMessage)) and rich-text blocks
//! - [`extractor`]: rows and reply records from raw messages; channel directories
//! - [`message`]: [`MessageRow`]
//! - [`config`]: [`ExtractConfig`](config::ExtractConfig), [`ChannelConfig`](config::ChannelConfig)
//! - [`core`]: tables, filtering, statistics, thread summaries, writers
//! - [`users`]: user id to real name lookup
//! - [`time`]: unix-seconds timestamp helpers
//! - [`format`]: [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`cli`]: CLI types (feature `cli`)
//! - [`error`]: [`ChatstatsError`], [`Result`]
//! - [`prelude`]: convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extractor;
pub mod format;
pub mod message;
pub mod parsing;
pub mod time;
pub mod users;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::MessageRow;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRow;
    pub use crate::error::{ChatstatsError, Result};

    pub use crate::config::{ChannelConfig, ExtractConfig};
    pub use crate::parsing::{RawMessage, parse_batch_str};

    pub use crate::extractor::{
        ChannelReader, extract, extract_replies, extract_with_config, read_channel,
        read_channel_with_config,
    };

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::{MessageTable, OutputConfig, ReplyRecord};
    pub use crate::core::stats::{ActivityStats, UserCounts, tagged_users, top_n};
    pub use crate::core::summary::{MessageSummary, summarize_threads};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, write_to_format};
    pub use crate::users::UserDirectory;
}
