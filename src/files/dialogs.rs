//! Native file dialog integration using the rfd crate
//!
//! This module provides functions to open native file picker dialogs
//! for opening and saving Markdown documents.

use rfd::FileDialog;
use std::path::PathBuf;

/// File extension filters for supported file types.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Opens a native file dialog for selecting a document to open.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn open_file_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open File")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog for saving a document.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_file_dialog(
    initial_dir: Option<&PathBuf>,
    default_name: Option<&str>,
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save As")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog = dialog.set_file_name(default_name.unwrap_or("untitled.md"));

    dialog.save_file()
}
