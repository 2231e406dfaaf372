//! Typed model of a channel export.
//!
//! This module contains the deserialization types for raw messages and
//! their rich-text blocks, plus the helpers that read annotations out of
//! them. The extractor and the summary projection both build on these.

pub mod blocks;
pub mod raw;

pub use blocks::{Annotations, ContentElement, ElementKind, collect_annotations};
pub use raw::{RawMessage, parse_batch_str};
