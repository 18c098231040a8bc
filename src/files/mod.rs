//! File operations module for slidedown
//!
//! This module acquires presentation documents from disk and writes edited
//! decks back.

mod document;

pub use document::{is_markdown_path, read_document, write_document, MARKDOWN_EXTENSIONS};
