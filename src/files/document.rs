//! Reading and writing presentation documents

use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// File extensions recognised as markdown documents.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn"];

/// Whether `path` has a markdown extension (case-insensitive).
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Read a whole document as UTF-8 text.
///
/// # Errors
///
/// Returns `Error::DocumentLoad` if the file is missing, unreadable, or not UTF-8.
pub fn read_document(path: &Path) -> Result<String> {
    debug!("Reading document: {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| Error::DocumentLoad {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Write a document, replacing the target only once the full text is on disk.
///
/// # Errors
///
/// Returns `Error::FileWrite` if the temporary file cannot be written or renamed.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&temp_path, text).map_err(|source| Error::FileWrite {
        path: temp_path.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(&temp_path, path) {
        if let Err(e) = fs::remove_file(&temp_path) {
            debug!("Could not remove {}: {}", temp_path.display(), e);
        }
        return Err(Error::FileWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_markdown_path() {
        assert!(is_markdown_path(Path::new("talk.md")));
        assert!(is_markdown_path(Path::new("TALK.MARKDOWN")));
        assert!(!is_markdown_path(Path::new("notes.txt")));
        assert!(!is_markdown_path(Path::new("README")));
    }

    #[test]
    fn test_read_missing_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, Error::DocumentLoad { path: p, .. } if p == path));
    }

    #[test]
    fn test_write_then_read_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.md");
        write_document(&path, "# A\n---\n# B").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# A\n---\n# B");
        assert!(!dir.path().join(".deck.md.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.md");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let result = write_document(&path, "# A");
        assert!(matches!(result, Err(Error::FileWrite { .. })));
        assert!(!dir.path().join(".deck.md.tmp").exists());
    }

    #[test]
    fn test_read_non_utf8_document_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            read_document(&path),
            Err(Error::DocumentLoad { .. })
        ));
    }
}
