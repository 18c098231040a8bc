//! Markdown to HTML rendering for slides
//!
//! This module turns the markdown of one slide into HTML through a fixed,
//! ordered pipeline of textual substitutions. It is deliberately small: no
//! nested blocks, no syntax highlighting, no CommonMark conformance.
//!
//! # Features
//! - Fenced code blocks, protected from every other rule
//! - Inline code, headings (rendered one level down: `#` is `<h2>`)
//! - Bold, italic, strikethrough
//! - Task checkboxes, ordered and unordered lists
//! - Images (lazy-loaded, size-bounded) and links
//!
//! # Example
//! ```
//! use slidedown::markdown::render;
//!
//! let html = render("# Hello\n\nThis is **bold** text.");
//! assert_eq!(html, "<h2>Hello</h2>\n\n<p>This is <strong>bold</strong> text.</p>");
//! ```

mod escape;
mod pipeline;
mod rules;

pub use escape::escape_html;
pub use pipeline::{render, FenceStore, Stage, STAGES};
