//! Slides and the read-only view handed to renderers

use crate::markdown::render;
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Slide
// ─────────────────────────────────────────────────────────────────────────────

/// One unit of the deck: its markdown source and the HTML rendered from it.
///
/// The HTML is only ever produced from the current source, so the two can
/// never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    raw_content: String,
    html: String,
}

impl Slide {
    /// Build a slide from one segment of a document, trimming it first.
    pub fn from_segment(segment: &str) -> Self {
        Self::from_markdown(segment.trim().to_string())
    }

    /// Build a slide from markdown taken as-is.
    pub fn from_markdown(raw_content: String) -> Self {
        let html = render(&raw_content);
        Self { raw_content, html }
    }

    /// The markdown source of this slide.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// The rendered HTML of this slide.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the source and re-render.
    pub(crate) fn set_raw_content(&mut self, markdown: String) {
        self.html = render(&markdown);
        self.raw_content = markdown;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slide View
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a rendering surface needs to show the current slide.
///
/// Derived on demand; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideView {
    /// Ready-to-insert markup
    pub html: String,
    /// Markdown source, for edit mode
    pub raw_content: String,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based position of the slide
    pub current_index: usize,
    pub total_slides: usize,
    /// `current_index / total_slides * 100`, in (0, 100]
    pub percentage_completed: f64,
}

impl SlideView {
    pub(crate) fn new(slide: &Slide, cursor: usize, total_slides: usize) -> Self {
        let current_index = cursor + 1;
        Self {
            html: slide.html.clone(),
            raw_content: slide.raw_content.clone(),
            has_previous: cursor > 0,
            has_next: current_index < total_slides,
            current_index,
            total_slides,
            percentage_completed: current_index as f64 / total_slides as f64 * 100.0,
        }
    }

    /// Short position label, e.g. `3 / 10`.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current_index, self.total_slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_from_segment_trims() {
        let slide = Slide::from_segment("\n\n  # Title  \n\n");
        assert_eq!(slide.raw_content(), "# Title");
        assert_eq!(slide.html(), "<h2>Title</h2>");
    }

    #[test]
    fn test_slide_set_raw_content_rerenders() {
        let mut slide = Slide::from_segment("old");
        slide.set_raw_content("**new**".to_string());
        assert_eq!(slide.raw_content(), "**new**");
        assert_eq!(slide.html(), render("**new**"));
    }

    #[test]
    fn test_view_first_of_three() {
        let slide = Slide::from_segment("a");
        let view = SlideView::new(&slide, 0, 3);
        assert!(!view.has_previous);
        assert!(view.has_next);
        assert_eq!(view.current_index, 1);
        assert_eq!(view.position_label(), "1 / 3");
    }

    #[test]
    fn test_view_single_slide_is_complete() {
        let slide = Slide::from_segment("");
        let view = SlideView::new(&slide, 0, 1);
        assert!(!view.has_previous);
        assert!(!view.has_next);
        assert_eq!(view.percentage_completed, 100.0);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let slide = Slide::from_segment("x");
        let json = serde_json::to_string(&SlideView::new(&slide, 1, 2)).unwrap();
        assert!(json.contains("\"rawContent\":\"x\""));
        assert!(json.contains("\"hasPrevious\":true"));
        assert!(json.contains("\"percentageCompleted\":100.0"));
    }
}
