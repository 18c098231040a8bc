//! HTML escaping for code content
//!
//! Only text that ends up inside `<code>` (inline or fenced) is escaped.
//! Everything else is markup produced by earlier pipeline stages.

/// Characters and their entity replacements, in application order.
///
/// `&` must come first so entities introduced by later replacements are
/// not escaped a second time.
const ENTITIES: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
    ('`', "&#96;"),
];

/// Escape `& < > " ' \`` into HTML entities.
///
/// # Example
/// ```
/// use slidedown::markdown::escape_html;
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// ```
pub fn escape_html(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (ch, entity)| {
            if acc.contains(*ch) {
                acc.replace(*ch, entity)
            } else {
                acc
            }
        })
}
