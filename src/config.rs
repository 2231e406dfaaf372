//! Configuration types for extraction and channel reading.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{ChannelConfig, ExtractConfig};
//!
//! let config = ChannelConfig::new()
//!     .with_extension("json")
//!     .with_extract(ExtractConfig::new().with_skip_incomplete(true));
//!
//! assert!(config.accepts("2024-01-15.json".as_ref()));
//! assert!(!config.accepts("notes.txt".as_ref()));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for turning raw messages into rows.
///
/// By default a content message without `text`, `user` or `ts` fails the
/// whole batch. With `skip_incomplete` such messages are dropped with a
/// warning instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Skip messages lacking a required field instead of failing (default: false)
    pub skip_incomplete: bool,
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that skips incomplete messages.
    pub fn lenient() -> Self {
        Self {
            skip_incomplete: true,
        }
    }

    #[must_use]
    pub fn with_skip_incomplete(mut self, skip: bool) -> Self {
        self.skip_incomplete = skip;
        self
    }
}

/// Configuration for reading a channel directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Only read files with this extension (default: every regular file)
    pub extension: Option<String>,

    /// How each file's messages are extracted
    pub extract: ExtractConfig,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts reading to files with the given extension (without dot).
    #[must_use]
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into().trim_start_matches('.').to_string());
        self
    }

    #[must_use]
    pub fn with_extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    /// Returns `true` if a file at `path` should be read.
    pub fn accepts(&self, path: &Path) -> bool {
        match &self.extension {
            None => true,
            Some(wanted) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted)),
        }
    }
}
