//! Slide deck state for slidedown
//!
//! This module splits a markdown document into slides, keeps each slide's
//! rendered HTML in step with its source, and tracks which slide is current.
//!
//! # Architecture
//!
//! - `slide.rs` - `Slide` and the derived `SlideView`
//! - `controller.rs` - `Presentation`: splitting, navigation, editing, ticketed loads

mod controller;
mod slide;

pub use controller::{split_document, LoadOutcome, LoadTicket, Presentation, SLIDE_SEPARATOR};
pub use slide::{Slide, SlideView};
