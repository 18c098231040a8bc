//! User settings and preferences for slidedown
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::export::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Document opened when none is named on the command line.
pub const DEFAULT_DOCUMENT: &str = "default.md";

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Color themes for exported decks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// `(background, foreground, accent)` colors used by the exported CSS.
    pub fn colors(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Theme::Light => ("#ffffff", "#1f2328", "#0969da"),
            Theme::Dark => ("#0d1117", "#e6edf3", "#4493f8"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences.
///
/// Serialized to JSON in the user's config directory. Every field has a
/// default, so partial or older files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color theme for exported decks
    pub theme: Theme,

    /// Document loaded when no path is given
    pub default_document: PathBuf,

    /// Recently opened documents (most recent first)
    pub recent_documents: Vec<PathBuf>,

    /// Maximum number of recent documents to remember
    pub max_recent_documents: usize,

    /// Options for HTML deck export
    pub export: ExportOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            default_document: PathBuf::from(DEFAULT_DOCUMENT),
            recent_documents: Vec::new(),
            max_recent_documents: 10,
            export: ExportOptions::default(),
        }
    }
}

impl Settings {
    /// Maximum value accepted for `max_recent_documents`.
    pub const MAX_RECENT_DOCUMENTS: usize = 100;

    /// Add a document to the recent list.
    ///
    /// An existing entry moves to the front; the list is trimmed to
    /// `max_recent_documents`. Returns whether the list changed, so callers
    /// only save when there is something new to persist.
    pub fn add_recent_document(&mut self, path: PathBuf) -> bool {
        if self.recent_documents.first() == Some(&path) {
            return false;
        }
        self.recent_documents.retain(|p| p != &path);
        self.recent_documents.insert(0, path);
        self.recent_documents.truncate(self.max_recent_documents);
        true
    }

    /// Clamp values to valid ranges after loading a hand-edited file.
    pub fn sanitize(&mut self) {
        if self.max_recent_documents == 0 {
            self.max_recent_documents = 10;
        } else if self.max_recent_documents > Self::MAX_RECENT_DOCUMENTS {
            self.max_recent_documents = Self::MAX_RECENT_DOCUMENTS;
        }
        self.recent_documents.truncate(self.max_recent_documents);

        if self.default_document.as_os_str().is_empty() {
            self.default_document = PathBuf::from(DEFAULT_DOCUMENT);
        }

        self.export.sanitize();
    }

    /// Deserialize then sanitize.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
