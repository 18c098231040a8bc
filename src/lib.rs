//! slidedown - markdown documents as navigable slide decks
//!
//! A document is split into slides on lines holding only `---`. Each slide's
//! markdown is rendered to HTML by a small, ordered substitution pipeline,
//! and a [`Presentation`] tracks the current slide for navigation and
//! in-place editing.
//!
//! ```
//! use slidedown::Presentation;
//!
//! let mut deck = Presentation::new("# Hi\n---\n**bold** and `code`");
//! assert_eq!(deck.current_view().unwrap().html, "<h2>Hi</h2>");
//!
//! let view = deck.advance().unwrap();
//! assert_eq!(view.html, "<p><strong>bold</strong> and <code>code</code></p>");
//! assert_eq!(view.percentage_completed, 100.0);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod markdown;
pub mod presentation;

pub use error::{Error, Result};
pub use markdown::render;
pub use presentation::{Presentation, Slide, SlideView};
