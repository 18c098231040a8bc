//! Deck Export Module for slidedown
//!
//! This module exports a loaded presentation as a standalone themed HTML page.
//!
//! # Architecture
//!
//! - `options.rs` - Export configuration and options
//! - `html.rs` - HTML deck generation with theme styling

pub mod html;
pub mod options;

pub use html::{default_output_path, export_deck_to_file, generate_deck_document};
pub use options::ExportOptions;
