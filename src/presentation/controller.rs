//! Presentation state: the slide deck and its cursor
//!
//! A `Presentation` owns the slides and the index of the current one. It is
//! only ever initialised by loading a document; navigation saturates at the
//! ends instead of failing.

use crate::error::{Error, Result};
use crate::presentation::{Slide, SlideView};
use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

/// A line holding only `---`, optionally padded with spaces or tabs
static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*---[ \t]*\r?$").unwrap());

/// Separator written between slides by [`Presentation::to_markdown`].
pub const SLIDE_SEPARATOR: &str = "\n\n---\n\n";

/// Split a document into slides on delimiter lines.
///
/// Always yields at least one slide: a document without delimiters, even an
/// empty one, is a single slide.
pub fn split_document(document: &str) -> Vec<Slide> {
    DELIMITER_RE
        .split(document)
        .map(Slide::from_segment)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Tickets
// ─────────────────────────────────────────────────────────────────────────────

/// Handed out when a document fetch starts; redeemed when it finishes.
///
/// Only the most recently issued ticket can replace the deck, and only once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// What happened when a finished load was handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The document replaced the deck; carries the first slide
    Applied(SlideView),
    /// A newer load was started meanwhile; the document was discarded
    Stale,
}

// ─────────────────────────────────────────────────────────────────────────────
// Presentation
// ─────────────────────────────────────────────────────────────────────────────

/// The slide deck and its cursor.
///
/// # Example
///
/// ```
/// use slidedown::presentation::Presentation;
///
/// let mut deck = Presentation::new("# One\n---\n# Two");
/// assert_eq!(deck.total_slides(), 2);
/// let view = deck.advance().unwrap();
/// assert_eq!(view.current_index, 2);
/// assert!(!view.has_next);
/// ```
#[derive(Debug, Clone)]
pub struct Presentation {
    slides: Vec<Slide>,
    /// 0-based; always `< slides.len()` unless the deck is empty
    cursor: usize,
    /// Bumped by every load so late fetches can be recognised
    generation: u64,
}

impl Presentation {
    /// Create a presentation from a document.
    pub fn new(document: &str) -> Self {
        let mut presentation = Self {
            slides: Vec::new(),
            cursor: 0,
            generation: 0,
        };
        presentation.load(document);
        presentation
    }

    /// Replace the whole deck with `document` and return to the first slide.
    ///
    /// Supersedes any load still in flight.
    pub fn load(&mut self, document: &str) {
        self.generation += 1;
        self.replace_slides(document);
    }

    /// Start an asynchronous load. The current deck stays valid until the
    /// ticket is redeemed with [`finish_load`](Self::finish_load).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        debug!("Load {} started", self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of a fetch started with [`begin_load`](Self::begin_load).
    ///
    /// A stale ticket is discarded whatever the result. A failed fetch is
    /// returned as the error and leaves the deck untouched. Redeeming a
    /// ticket settles it, so a replayed ticket is stale.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String>,
    ) -> Result<LoadOutcome> {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale load {} (current is {})",
                ticket.generation, self.generation
            );
            return Ok(LoadOutcome::Stale);
        }
        self.generation += 1;

        let document = fetched.map_err(|e| {
            warn!("Load {} failed: {}", ticket.generation, e);
            e
        })?;

        self.replace_slides(&document);
        match self.current_view() {
            Some(view) => Ok(LoadOutcome::Applied(view)),
            None => Err(Error::EmptyPresentation),
        }
    }

    fn replace_slides(&mut self, document: &str) {
        let slides = split_document(document);
        info!("Loaded presentation with {} slides", slides.len());
        self.slides = slides;
        self.cursor = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of slides; zero only after the last slide was deleted.
    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// 0-based index of the current slide.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// All slides, in document order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// A slide by 0-based index.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// The view of the current slide, or `None` if the deck is empty.
    pub fn current_view(&self) -> Option<SlideView> {
        self.slides
            .get(self.cursor)
            .map(|slide| SlideView::new(slide, self.cursor, self.slides.len()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to the next slide if there is one. Stays put on the last slide.
    pub fn advance(&mut self) -> Option<SlideView> {
        if self.cursor + 1 < self.slides.len() {
            self.cursor += 1;
            debug!("Advanced to slide {}", self.cursor + 1);
        }
        self.current_view()
    }

    /// Move to the previous slide if there is one. Stays put on the first slide.
    pub fn retreat(&mut self) -> Option<SlideView> {
        if self.cursor > 0 {
            self.cursor -= 1;
            debug!("Retreated to slide {}", self.cursor + 1);
        }
        self.current_view()
    }

    /// Jump to a 0-based index, clamped to the last slide.
    pub fn go_to(&mut self, index: usize) -> Option<SlideView> {
        if !self.slides.is_empty() {
            self.cursor = index.min(self.slides.len() - 1);
        }
        self.current_view()
    }

    /// Jump to a 1-based slide number that must exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::SlideOutOfRange` for `0` or a number past the last
    /// slide; the cursor is left where it was.
    pub fn go_to_slide(&mut self, number: usize) -> Result<SlideView> {
        let total = self.slides.len();
        if number == 0 || number > total {
            return Err(Error::SlideOutOfRange {
                requested: number,
                total,
            });
        }
        self.go_to(number - 1).ok_or(Error::EmptyPresentation)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the markdown of the current slide and re-render it.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyPresentation` if every slide has been deleted.
    pub fn set_current_raw_content(&mut self, markdown: impl Into<String>) -> Result<SlideView> {
        let slide = self
            .slides
            .get_mut(self.cursor)
            .ok_or(Error::EmptyPresentation)?;
        slide.set_raw_content(markdown.into());
        debug!("Edited slide {}", self.cursor + 1);
        self.current_view().ok_or(Error::EmptyPresentation)
    }

    /// Remove the current slide.
    ///
    /// The cursor stays on the same index, so it lands on the slide that
    /// shifted into place, or on the new last slide. Returns `Ok(None)` when
    /// the deck became empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyPresentation` if the deck was already empty.
    pub fn delete_current(&mut self) -> Result<Option<SlideView>> {
        if self.slides.is_empty() {
            return Err(Error::EmptyPresentation);
        }

        self.slides.remove(self.cursor);
        if self.slides.is_empty() {
            self.cursor = 0;
            info!("Deleted the last remaining slide");
            return Ok(None);
        }

        self.cursor = self.cursor.min(self.slides.len() - 1);
        debug!(
            "Deleted slide, now on {} of {}",
            self.cursor + 1,
            self.slides.len()
        );
        Ok(self.current_view())
    }

    /// Join the slide sources back into one document.
    pub fn to_markdown(&self) -> String {
        self.slides
            .iter()
            .map(Slide::raw_content)
            .collect::<Vec<_>>()
            .join(SLIDE_SEPARATOR)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::render;
    use std::io;
    use std::path::PathBuf;

    fn three_slides() -> Presentation {
        Presentation::new("# One\n---\n# Two\n---\n# Three")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Splitting
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_split_two_slides() {
        let deck = Presentation::new("# Hi\n---\n**bold** and `code`");
        assert_eq!(deck.total_slides(), 2);
        assert_eq!(deck.slide(0).unwrap().html(), "<h2>Hi</h2>");
        assert_eq!(
            deck.slide(1).unwrap().html(),
            "<p><strong>bold</strong> and <code>code</code></p>"
        );
    }

    #[test]
    fn test_split_empty_document_is_one_slide() {
        let deck = Presentation::new("");
        assert_eq!(deck.total_slides(), 1);
        assert_eq!(deck.slide(0).unwrap().raw_content(), "");
        assert_eq!(deck.slide(0).unwrap().html(), "");
    }

    #[test]
    fn test_split_delimiter_only_is_two_empty_slides() {
        let deck = Presentation::new("---");
        assert_eq!(deck.total_slides(), 2);
        assert!(deck.slides().iter().all(|s| s.raw_content().is_empty()));
    }

    #[test]
    fn test_split_delimiter_with_padding_and_crlf() {
        let deck = Presentation::new("a\r\n  ---\t\r\nb");
        assert_eq!(deck.total_slides(), 2);
        assert_eq!(deck.slide(0).unwrap().raw_content(), "a");
        assert_eq!(deck.slide(1).unwrap().raw_content(), "b");
    }

    #[test]
    fn test_split_ignores_inline_and_longer_rules() {
        let deck = Presentation::new("a --- b\n----\nc");
        assert_eq!(deck.total_slides(), 1);
    }

    #[test]
    fn test_load_twice_is_identical() {
        let doc = "# A\n---\n- x\n- y\n---\n```\ncode\n```";
        let first = Presentation::new(doc);
        let mut second = Presentation::new("other");
        second.load(doc);
        assert_eq!(first.slides(), second.slides());
    }

    #[test]
    fn test_load_resets_cursor() {
        let mut deck = three_slides();
        deck.advance();
        deck.advance();
        deck.load("x\n---\ny");
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.total_slides(), 2);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_advance_saturates_at_last() {
        let mut deck = three_slides();
        deck.advance();
        let view = deck.advance().unwrap();
        assert_eq!(view.current_index, 3);
        assert!(!view.has_next);
        assert!(view.has_previous);
        let again = deck.advance().unwrap();
        assert_eq!(again.current_index, 3);
        assert_eq!(again.percentage_completed, 100.0);
    }

    #[test]
    fn test_retreat_saturates_at_first() {
        let mut deck = three_slides();
        let view = deck.retreat().unwrap();
        assert_eq!(view.current_index, 1);
        assert!(!view.has_previous);
        deck.advance();
        assert_eq!(deck.retreat().unwrap().current_index, 1);
    }

    #[test]
    fn test_percentage_completed() {
        let mut deck = Presentation::new("a\n---\nb\n---\nc\n---\nd");
        assert_eq!(deck.current_view().unwrap().percentage_completed, 25.0);
        deck.advance();
        assert_eq!(deck.current_view().unwrap().percentage_completed, 50.0);
    }

    #[test]
    fn test_single_slide_view() {
        let deck = Presentation::new("only");
        let view = deck.current_view().unwrap();
        assert!(!view.has_next);
        assert!(!view.has_previous);
        assert_eq!(view.percentage_completed, 100.0);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut deck = three_slides();
        assert_eq!(deck.go_to(1).unwrap().current_index, 2);
        assert_eq!(deck.go_to(99).unwrap().current_index, 3);
    }

    #[test]
    fn test_go_to_slide_rejects_out_of_range() {
        let mut deck = three_slides();
        deck.advance();
        assert!(matches!(
            deck.go_to_slide(0),
            Err(Error::SlideOutOfRange { requested: 0, total: 3 })
        ));
        assert!(matches!(
            deck.go_to_slide(9),
            Err(Error::SlideOutOfRange { requested: 9, total: 3 })
        ));
        assert_eq!(deck.current_index(), 1);
        assert_eq!(deck.go_to_slide(3).unwrap().raw_content, "# Three");
    }

    #[test]
    fn test_go_to_slide_on_empty_deck() {
        let mut deck = Presentation::new("solo");
        deck.delete_current().unwrap();
        assert!(matches!(
            deck.go_to_slide(1),
            Err(Error::SlideOutOfRange { requested: 1, total: 0 })
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_current_raw_content() {
        let mut deck = three_slides();
        deck.advance();
        let view = deck.set_current_raw_content("~~gone~~ *here*").unwrap();
        assert_eq!(view.raw_content, "~~gone~~ *here*");
        assert_eq!(view.html, render("~~gone~~ *here*"));
        assert_eq!(deck.current_index(), 1);
        assert_eq!(deck.total_slides(), 3);
        assert_eq!(deck.slide(1).unwrap().html(), view.html);
    }

    #[test]
    fn test_delete_middle_lands_on_next() {
        let mut deck = three_slides();
        deck.advance();
        let view = deck.delete_current().unwrap().unwrap();
        assert_eq!(deck.total_slides(), 2);
        assert_eq!(view.raw_content, "# Three");
        assert_eq!(view.current_index, 2);
    }

    #[test]
    fn test_delete_first_stays_on_first() {
        let mut deck = three_slides();
        let view = deck.delete_current().unwrap().unwrap();
        assert_eq!(deck.current_index(), 0);
        assert_eq!(view.current_index, 1);
        assert_eq!(view.raw_content, "# Two");
        assert!(!view.has_previous);
        assert_eq!(deck.total_slides(), 2);
    }

    #[test]
    fn test_delete_last_clamps_cursor() {
        let mut deck = three_slides();
        deck.go_to(2);
        let view = deck.delete_current().unwrap().unwrap();
        assert_eq!(view.raw_content, "# Two");
        assert_eq!(deck.current_index(), 1);
    }

    #[test]
    fn test_delete_only_slide_empties_deck() {
        let mut deck = Presentation::new("solo");
        assert!(deck.delete_current().unwrap().is_none());
        assert!(deck.is_empty());
        assert_eq!(deck.total_slides(), 0);
        assert!(deck.current_view().is_none());
        assert!(deck.advance().is_none());
        assert!(deck.retreat().is_none());
    }

    #[test]
    fn test_mutating_empty_deck_is_error() {
        let mut deck = Presentation::new("solo");
        deck.delete_current().unwrap();
        assert!(matches!(
            deck.set_current_raw_content("x"),
            Err(Error::EmptyPresentation)
        ));
        assert!(matches!(deck.delete_current(), Err(Error::EmptyPresentation)));
    }

    #[test]
    fn test_load_after_empty_restores_deck() {
        let mut deck = Presentation::new("solo");
        deck.delete_current().unwrap();
        deck.load("back");
        assert_eq!(deck.current_view().unwrap().raw_content, "back");
    }

    #[test]
    fn test_to_markdown_roundtrip() {
        let mut deck = three_slides();
        deck.set_current_raw_content("# Edited").unwrap();
        let reloaded = Presentation::new(&deck.to_markdown());
        assert_eq!(reloaded.slides(), deck.slides());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ticketed loading
    // ─────────────────────────────────────────────────────────────────────────

    fn load_failure() -> Error {
        Error::DocumentLoad {
            path: PathBuf::from("missing.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        }
    }

    #[test]
    fn test_finish_load_applies_current_ticket() {
        let mut deck = three_slides();
        let ticket = deck.begin_load();
        let outcome = deck.finish_load(ticket, Ok("new\n---\ndeck".to_string()));
        match outcome.unwrap() {
            LoadOutcome::Applied(view) => {
                assert_eq!(view.raw_content, "new");
                assert_eq!(view.total_slides, 2);
            }
            LoadOutcome::Stale => panic!("Expected the load to apply"),
        }
    }

    #[test]
    fn test_failed_load_leaves_state_intact() {
        let mut deck = three_slides();
        deck.advance();
        let before = deck.slides().to_vec();
        let ticket = deck.begin_load();
        let result = deck.finish_load(ticket, Err(load_failure()));
        assert!(matches!(result, Err(Error::DocumentLoad { .. })));
        assert_eq!(deck.slides(), before.as_slice());
        assert_eq!(deck.current_index(), 1);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut deck = three_slides();
        let older = deck.begin_load();
        let newer = deck.begin_load();

        let applied = deck.finish_load(newer, Ok("newer".to_string())).unwrap();
        assert!(matches!(applied, LoadOutcome::Applied(_)));

        let stale = deck.finish_load(older, Ok("older".to_string())).unwrap();
        assert_eq!(stale, LoadOutcome::Stale);
        assert_eq!(deck.current_view().unwrap().raw_content, "newer");
    }

    #[test]
    fn test_redeemed_ticket_cannot_apply_twice() {
        let mut deck = three_slides();
        let ticket = deck.begin_load();
        let replay = ticket.clone();

        let first = deck.finish_load(ticket, Ok("first\n---\nx".to_string())).unwrap();
        assert!(matches!(first, LoadOutcome::Applied(_)));
        deck.advance();

        let second = deck.finish_load(replay, Ok("second".to_string())).unwrap();
        assert_eq!(second, LoadOutcome::Stale);
        assert_eq!(deck.current_index(), 1);
        assert_eq!(deck.current_view().unwrap().raw_content, "x");
    }

    #[test]
    fn test_failed_ticket_is_settled() {
        let mut deck = three_slides();
        let ticket = deck.begin_load();
        let replay = ticket.clone();
        assert!(deck.finish_load(ticket, Err(load_failure())).is_err());

        let outcome = deck.finish_load(replay, Ok("late".to_string())).unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(deck.total_slides(), 3);
    }

    #[test]
    fn test_direct_load_supersedes_pending_ticket() {
        let mut deck = three_slides();
        let pending = deck.begin_load();
        deck.load("direct");
        let outcome = deck.finish_load(pending, Err(load_failure())).unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(deck.current_view().unwrap().raw_content, "direct");
    }
}
