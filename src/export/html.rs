//! HTML Deck Export
//!
//! This module writes a whole presentation into one standalone HTML page,
//! with every slide as a `<section>` and the theme CSS inlined.

use crate::config::Theme;
use crate::error::{Error, Result};
use crate::export::ExportOptions;
use crate::markdown::escape_html;
use crate::presentation::{Presentation, SlideView};
use log::info;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document holding every slide of the deck.
///
/// # Arguments
///
/// * `presentation` - The deck to export; its cursor is not used or changed
/// * `title` - Optional document title
/// * `theme` - Color theme for the inlined CSS
/// * `options` - Export options
pub fn generate_deck_document(
    presentation: &Presentation,
    title: Option<&str>,
    theme: Theme,
    options: &ExportOptions,
) -> String {
    let doc_title = if options.include_title {
        title.unwrap_or("Presentation")
    } else {
        ""
    };

    let mut body = String::new();
    for view in deck_views(presentation) {
        body.push_str(&render_section(&view, options));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="slidedown">
    <title>{title}</title>
    <style>
{base_css}
{theme_css}
{image_css}
{custom_css}
    </style>
</head>
<body>
    <main class="deck">
{body}    </main>
</body>
</html>"#,
        title = escape_html(doc_title),
        base_css = BASE_CSS,
        theme_css = generate_theme_css(theme),
        image_css = generate_image_css(options.max_image_height_vh),
        custom_css = options.custom_css.as_deref().unwrap_or(""),
        body = body,
    )
}

/// Render the deck and write it to `output_path`.
///
/// The title is taken from the output file stem.
pub fn export_deck_to_file(
    presentation: &Presentation,
    output_path: &Path,
    theme: Theme,
    options: &ExportOptions,
) -> Result<()> {
    let title = output_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Presentation");

    let html = generate_deck_document(presentation, Some(title), theme, options);
    std::fs::write(output_path, html).map_err(|source| Error::FileWrite {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(
        "Exported {} slides to {}",
        presentation.total_slides(),
        output_path.display()
    );
    Ok(())
}

/// Where `export` writes when no output path is given: `<stem>.html` in the
/// last export directory, or the working directory.
pub fn default_output_path(document: &Path, options: &ExportOptions) -> PathBuf {
    let stem = document
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("presentation");
    let dir = options
        .last_export_directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("{stem}.html"))
}

/// Views of every slide, as they would look with the cursor on each.
fn deck_views(presentation: &Presentation) -> Vec<SlideView> {
    let mut walker = presentation.clone();
    (0..presentation.total_slides())
        .filter_map(|index| walker.go_to(index))
        .collect()
}

fn render_section(view: &SlideView, options: &ExportOptions) -> String {
    let mut section = String::new();
    let _ = writeln!(
        section,
        r#"        <section class="slide" id="slide-{}">"#,
        view.current_index
    );
    let _ = writeln!(section, "{}", view.html);
    if options.show_slide_numbers {
        let _ = writeln!(
            section,
            r#"        <footer class="slide-number">{}</footer>"#,
            view.position_label()
        );
    }
    if options.show_progress {
        let _ = writeln!(
            section,
            r#"        <div class="progress"><div class="progress-bar" style="width: {:.2}%"></div></div>"#,
            view.percentage_completed
        );
    }
    section.push_str("        </section>\n");
    section
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for slide layout and typography.
const BASE_CSS: &str = r#"
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 24px;
    line-height: 1.5;
}

.slide {
    position: relative;
    min-height: 100vh;
    padding: 48px 64px;
    page-break-after: always;
}

.slide h2 { font-size: 2em; margin: 0 0 0.6em; }
.slide h3 { font-size: 1.5em; margin: 0 0 0.5em; }
.slide h4 { font-size: 1.2em; margin: 0 0 0.4em; }

.slide code {
    font-family: 'JetBrains Mono', 'Fira Code', 'Consolas', 'Monaco', monospace;
    font-size: 0.9em;
    padding: 0.1em 0.3em;
    border-radius: 4px;
}

.slide pre {
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
}

.slide pre code {
    padding: 0;
    background: transparent;
}

.checkbox-item {
    margin: 0.2em 0;
}

.slide-number {
    position: absolute;
    right: 24px;
    bottom: 16px;
    font-size: 0.6em;
    opacity: 0.7;
}

.progress {
    position: absolute;
    left: 0;
    right: 0;
    bottom: 0;
    height: 4px;
}

.progress-bar {
    height: 100%;
}
"#;

/// Generate theme-specific CSS.
fn generate_theme_css(theme: Theme) -> String {
    let (background, text, accent) = theme.colors();
    let color_scheme = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };

    format!(
        r#"
:root {{
    color-scheme: {color_scheme};
}}

body {{
    background-color: {background};
    color: {text};
}}

.slide a {{
    color: {accent};
}}

.slide code, .slide pre {{
    background-color: rgba(128, 128, 128, 0.15);
}}

.progress-bar {{
    background-color: {accent};
}}
"#
    )
}

/// Image height cap. Rendered images carry an inline `max-height`, so the
/// rule needs `!important` to take effect.
fn generate_image_css(max_height_vh: u8) -> String {
    format!(".slide img {{\n    max-height: {max_height_vh}vh !important;\n}}\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
