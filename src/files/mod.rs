//! Document file operations for Citrine
//!
//! Reading and writing documents on disk, plus the native open/save
//! dialogs. All I/O happens outside the refresh hot path, invoked directly
//! from menu and toolbar actions.

pub mod dialogs;

use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Read a document as UTF-8 text.
pub fn read_document(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Opened {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Write a document to disk.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {} ({} bytes)", path.display(), content.len());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        write_document(&path, "# Hello\n\ncontent").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# Hello\n\ncontent");
    }

    #[test]
    fn test_read_missing_file_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_write_to_missing_directory_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("doc.md");
        let err = write_document(&path, "content").unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }
}
