//! Substitution rules for the slide renderer
//!
//! Each function here is one pipeline stage: a pure transform from the
//! previous stage's text to the next. The order they run in is fixed by
//! [`STAGES`](super::STAGES); the pre/post-conditions below assume it.

use super::escape::escape_html;
use super::pipeline::FenceStore;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Triple-backtick fence, non-greedy, may span lines
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

/// Single-backtick inline code on one line
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// `#`, `##` or `###` followed by a space and non-blank text
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,3}) [ \t]*(\S.*?)[ \t]*$").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").unwrap());

/// Single asterisks hugging non-space text, so `* item` list markers never open an italic span
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*\n]*?[^*\s])?)\*").unwrap());

static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~([^~\n]+?)~~").unwrap());

static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*- \[([ xX])\] (.*)$").unwrap());

static UNORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[*-] (.*)$").unwrap());

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\. (.*)$").unwrap());

/// A list item produced by the item stage, still carrying its list kind
static TAGGED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<li data-list="(ul|ol)">(.*)</li>$"#).unwrap());

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^()\s]+)\)").unwrap());

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^()\s]+)\)").unwrap());

/// Lines that already are a block element and must not be wrapped in `<p>`
static BLOCK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^</?(?:h[1-6]|ul|ol|li|div|pre|p|blockquote|table|thead|tbody|tr|th|td|hr|section)\b.*>$",
    )
    .unwrap()
});

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x00FENCE(\d+)\x00").unwrap());

static PLACEHOLDER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\x00FENCE\d+\x00$").unwrap());

/// Inline style applied to every rendered image.
const IMAGE_STYLE: &str = "max-width: 100%; max-height: 60vh;";

// ─────────────────────────────────────────────────────────────────────────────
// Stages
// ─────────────────────────────────────────────────────────────────────────────

/// Move every fenced block into `fences`, leaving a placeholder token behind.
///
/// Post: no triple-backtick pair remains; `fences` holds the trimmed
/// contents in occurrence order.
pub(crate) fn extract_fences(text: &str, fences: &mut FenceStore) -> String {
    FENCE_RE
        .replace_all(text, |caps: &Captures| fences.push(caps[1].trim()))
        .into_owned()
}

/// Pre: fences are extracted. Post: `` `x` `` is `<code>x</code>` with `x` escaped.
pub(crate) fn inline_code(text: &str, _fences: &mut FenceStore) -> String {
    INLINE_CODE_RE
        .replace_all(text, |caps: &Captures| {
            format!("<code>{}</code>", escape_html(&caps[1]))
        })
        .into_owned()
}

/// Headings render one level below their marker count: `#` is `<h2>`.
pub(crate) fn headings(text: &str, _fences: &mut FenceStore) -> String {
    HEADING_RE
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len() + 1;
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

/// Bold, then italic, then strikethrough. Nested spans are not resolved.
pub(crate) fn emphasis(text: &str, _fences: &mut FenceStore) -> String {
    let text = BOLD_RE.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>${1}</em>");
    STRIKE_RE.replace_all(&text, "<del>${1}</del>").into_owned()
}

/// Task rows become disabled checkboxes. Must run before [`list_items`]
/// so `- [ ]` is never read as a bullet.
pub(crate) fn checkboxes(text: &str, _fences: &mut FenceStore) -> String {
    CHECKBOX_RE
        .replace_all(text, |caps: &Captures| {
            let checked = if caps[1].eq_ignore_ascii_case("x") {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<div class="checkbox-item"><input type="checkbox" disabled{checked}> {}</div>"#,
                &caps[2]
            )
        })
        .into_owned()
}

/// Post: every list line is `<li data-list="ul|ol">…</li>`, consumed by [`group_lists`].
pub(crate) fn list_items(text: &str, _fences: &mut FenceStore) -> String {
    let text = UNORDERED_ITEM_RE.replace_all(text, r#"<li data-list="ul">${1}</li>"#);
    ORDERED_ITEM_RE
        .replace_all(&text, r#"<li data-list="ol">${1}</li>"#)
        .into_owned()
}

/// Wrap each contiguous run of same-kind items in `<ul>` or `<ol>`.
///
/// Any other line, blank lines included, closes the open list.
/// Post: no `data-list` tag remains.
pub(crate) fn group_lists(text: &str, _fences: &mut FenceStore) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open: Option<&'static str> = None;

    for line in text.split('\n') {
        match TAGGED_ITEM_RE.captures(line) {
            Some(caps) => {
                let kind = if &caps[1] == "ol" { "ol" } else { "ul" };
                if open != Some(kind) {
                    if let Some(previous) = open.take() {
                        out.push(format!("</{previous}>"));
                    }
                    out.push(format!("<{kind}>"));
                    open = Some(kind);
                }
                out.push(format!("<li>{}</li>", &caps[2]));
            }
            None => {
                if let Some(previous) = open.take() {
                    out.push(format!("</{previous}>"));
                }
                out.push(line.to_string());
            }
        }
    }

    if let Some(previous) = open {
        out.push(format!("</{previous}>"));
    }

    out.join("\n")
}

/// Images first, then links: both share the `[..](..)` grammar.
pub(crate) fn images_and_links(text: &str, _fences: &mut FenceStore) -> String {
    let text = IMAGE_RE.replace_all(text, |caps: &Captures| {
        format!(
            r#"<img src="{}" alt="{}" loading="lazy" style="{}">"#,
            caps[2].replace('"', "&quot;"),
            caps[1].replace('"', "&quot;"),
            IMAGE_STYLE
        )
    });
    LINK_RE
        .replace_all(&text, |caps: &Captures| {
            format!(r#"<a href="{}">{}</a>"#, caps[2].replace('"', "&quot;"), &caps[1])
        })
        .into_owned()
}

/// Wrap every remaining text line in `<p>`.
///
/// Blank lines, block elements, and fence placeholders are left untouched.
pub(crate) fn paragraphs(text: &str, _fences: &mut FenceStore) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty()
                || BLOCK_LINE_RE.is_match(trimmed)
                || PLACEHOLDER_LINE_RE.is_match(trimmed)
            {
                line.to_string()
            } else {
                format!("<p>{trimmed}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace placeholders with `<pre><code>` blocks holding the escaped fence text.
pub(crate) fn restore_fences(text: &str, fences: &mut FenceStore) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let block = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| fences.get(index));
            match block {
                Some(content) => format!("<pre><code>{}</code></pre>", escape_html(content)),
                None => String::new(),
            }
        })
        .into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
