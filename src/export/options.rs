//! Export Options and Configuration
//!
//! This module defines the options controlling deck export.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration options for deck export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Whether to put the document title in `<title>`
    pub include_title: bool,

    /// Whether each slide carries a progress bar
    pub show_progress: bool,

    /// Whether each slide shows its `n / total` position
    pub show_slide_numbers: bool,

    /// Tallest an image may be, as a percentage of the viewport height
    pub max_image_height_vh: u8,

    /// Custom CSS appended after the built-in styles
    pub custom_css: Option<String>,

    /// Last export directory (for remembering user preference)
    pub last_export_directory: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_title: true,
            show_progress: true,
            show_slide_numbers: true,
            max_image_height_vh: Self::DEFAULT_MAX_IMAGE_HEIGHT_VH,
            custom_css: None,
            last_export_directory: None,
        }
    }
}

impl ExportOptions {
    /// Image height cap used when none is configured.
    pub const DEFAULT_MAX_IMAGE_HEIGHT_VH: u8 = 60;

    /// Accepted range for `max_image_height_vh`.
    pub const IMAGE_HEIGHT_RANGE: (u8, u8) = (10, 100);

    /// Options for a bare deck without navigation chrome.
    pub fn plain() -> Self {
        Self {
            show_progress: false,
            show_slide_numbers: false,
            ..Default::default()
        }
    }

    /// Clamp values a hand-edited config could put out of range.
    pub fn sanitize(&mut self) {
        let (min, max) = Self::IMAGE_HEIGHT_RANGE;
        self.max_image_height_vh = self.max_image_height_vh.clamp(min, max);
    }

    /// Append custom CSS.
    pub fn with_custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }
}
