//! The ordered rendering pipeline
//!
//! Rendering is a fold of [`STAGES`] over the input text. Each stage is a
//! pure function of its input plus the shared [`FenceStore`], which only the
//! first and last stages touch.

use super::rules;
use log::trace;

// ─────────────────────────────────────────────────────────────────────────────
// Fence Store
// ─────────────────────────────────────────────────────────────────────────────

/// Fenced code blocks held aside while the other stages run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceStore {
    blocks: Vec<String>,
}

impl FenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The placeholder token standing in for block `index`.
    ///
    /// Delimited by NUL so no markdown rule can match inside it.
    pub fn placeholder(index: usize) -> String {
        format!("\u{0}FENCE{index}\u{0}")
    }

    /// Keep `content` and return the placeholder that replaces it.
    pub fn push(&mut self, content: &str) -> String {
        self.blocks.push(content.to_string());
        Self::placeholder(self.blocks.len() - 1)
    }

    /// Content of block `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.blocks.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stages
// ─────────────────────────────────────────────────────────────────────────────

type Transform = fn(&str, &mut FenceStore) -> String;

/// One named step of the pipeline.
#[derive(Clone, Copy)]
pub struct Stage {
    name: &'static str,
    transform: Transform,
}

impl Stage {
    const fn new(name: &'static str, transform: Transform) -> Self {
        Self { name, transform }
    }

    /// Short identifier, used in trace logging.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run this stage alone.
    pub fn apply(&self, input: &str, fences: &mut FenceStore) -> String {
        (self.transform)(input, fences)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// Every stage, in the order it must run.
///
/// Fences go first so nothing rewrites code; images precede links because
/// they share the bracket grammar; paragraphs run after all block rules so
/// only leftover text is wrapped.
pub static STAGES: [Stage; 10] = [
    Stage::new("fences", rules::extract_fences),
    Stage::new("inline-code", rules::inline_code),
    Stage::new("headings", rules::headings),
    Stage::new("emphasis", rules::emphasis),
    Stage::new("checkboxes", rules::checkboxes),
    Stage::new("list-items", rules::list_items),
    Stage::new("list-groups", rules::group_lists),
    Stage::new("images-links", rules::images_and_links),
    Stage::new("paragraphs", rules::paragraphs),
    Stage::new("restore-fences", rules::restore_fences),
];

// ─────────────────────────────────────────────────────────────────────────────
// Render
// ─────────────────────────────────────────────────────────────────────────────

/// Render one slide's markdown to HTML.
///
/// Total and deterministic: unmatched syntax passes through as text, and
/// empty or all-whitespace input yields an empty string.
///
/// # Example
/// ```
/// use slidedown::markdown::render;
/// assert_eq!(render("# Hi"), "<h2>Hi</h2>");
/// assert_eq!(render("   "), "");
/// ```
pub fn render(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let mut fences = FenceStore::new();
    STAGES
        .iter()
        .fold(markdown.replace("\r\n", "\n"), |text, stage| {
            let next = stage.apply(&text, &mut fences);
            trace!("stage {}: {} -> {} bytes", stage.name(), text.len(), next.len());
            next
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
