//! Application state management for Citrine
//!
//! This module defines the central `AppState` struct owning the document
//! buffer, the user settings, and the refresh machinery, plus the last
//! outputs handed to the UI surfaces (preview HTML, status line, highlight
//! overlay). Everything is touched only from the UI thread.

use crate::config::{load_config, Settings, Theme};
use crate::editor::TextStats;
use crate::highlight::{Span, Tag};
use crate::preview::EMPTY_PREVIEW_HTML;
use crate::refresh::{restyle_spans, PreviewRefresher, RefreshOutput, RefreshScheduler, StyledSpan};
use crate::theme::TagPalette;
use log::debug;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The document being edited: buffer, origin path, and dirty flag.
///
/// The buffer is the single source of truth; it is reset to empty on "new"
/// and replaced wholesale on "open".
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Full buffer content
    pub content: String,
    /// File path (None for unsaved/new documents)
    pub path: Option<PathBuf>,
    /// Whether there are unsaved changes
    pub modified: bool,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document loaded from a file.
    pub fn with_file(path: PathBuf, content: String) -> Self {
        Self {
            content,
            path: Some(path),
            modified: false,
        }
    }

    /// File name for the title bar and status messages.
    pub fn file_name(&self) -> &str {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
    }

    /// Window title, with a `*` marker for unsaved changes.
    pub fn title(&self) -> String {
        let mut title = match self.path {
            Some(_) => format!("{} - Citrine", self.file_name()),
            None => "Citrine".to_string(),
        };
        if self.modified {
            title = format!("* {}", title);
        }
        title
    }

    /// Mark the current content as saved.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pending Actions
// ─────────────────────────────────────────────────────────────────────────────

/// A destructive transition waiting on the unsaved-changes confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace the buffer with a fresh empty document
    NewDocument,
    /// Show the open dialog and replace the buffer
    OpenDocument,
    /// Quit the application
    Quit,
}

// ─────────────────────────────────────────────────────────────────────────────
// App State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state.
///
/// Owns the buffer, the settings, the debounce scheduler, and the refresher,
/// along with the most recent refresh results as consumed by the UI panes.
pub struct AppState {
    /// The document being edited
    pub document: Document,
    /// User settings (theme, auto-preview, font size, window size)
    pub settings: Settings,
    /// Debounce state machine for edit events
    pub scheduler: RefreshScheduler,
    /// Refresh pipeline with the last-rendered snapshot
    pub refresher: PreviewRefresher,
    /// HTML currently shown in the preview pane
    pub preview_html: String,
    /// Text currently shown in the status bar
    pub status_line: String,
    /// Highlight overlay from the last refresh
    spans: Vec<StyledSpan>,
    /// Search match overlay (managed by the search panel)
    search_spans: Vec<StyledSpan>,
}

impl AppState {
    /// Create the initial state, loading persisted settings.
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            settings: load_config(),
            scheduler: RefreshScheduler::new(),
            refresher: PreviewRefresher::new(),
            preview_html: EMPTY_PREVIEW_HTML.to_string(),
            status_line: TextStats::default().status_line(),
            spans: Vec::new(),
            search_spans: Vec::new(),
        }
    }

    /// Apply one refresh output to the UI surfaces.
    ///
    /// The preview, status, and overlay all change together; callers decide
    /// separately whether the refresh marks the document modified.
    pub fn apply_refresh(&mut self, output: RefreshOutput) {
        self.preview_html = output.html;
        self.status_line = output.stats.status_line();
        self.spans = output.spans;
    }

    /// Prepare for replacing the buffer (new/open/close).
    ///
    /// Cancels any pending refresh deadline synchronously, before the buffer
    /// mutation, so a stale refresh can never fire over fresh content; also
    /// clears the last-rendered snapshot so the next refresh always runs.
    pub fn begin_document_transition(&mut self) {
        debug!("document transition: cancelling pending refresh");
        self.scheduler.cancel();
        self.refresher.reset();
    }

    /// Reset the UI surfaces to their empty-document state.
    pub fn reset_surfaces(&mut self) {
        self.preview_html = EMPTY_PREVIEW_HTML.to_string();
        self.status_line = TextStats::default().status_line();
        self.spans.clear();
        self.search_spans.clear();
    }

    /// Combined overlay for the editor layouter.
    ///
    /// Search spans come last so they paint over rule spans of equal extent.
    pub fn overlay_spans(&self) -> Vec<StyledSpan> {
        let mut all = Vec::with_capacity(self.spans.len() + self.search_spans.len());
        all.extend_from_slice(&self.spans);
        all.extend_from_slice(&self.search_spans);
        all
    }

    /// Replace the search overlay, styling the raw spans for the active theme.
    pub fn set_search_spans(&mut self, spans: Vec<Span>) {
        let palette = TagPalette::resolve(self.settings.theme);
        self.search_spans = spans
            .into_iter()
            .map(|span| StyledSpan {
                span,
                style: palette.style(Tag::SearchMatch),
            })
            .collect();
    }

    /// Remove all search highlights.
    pub fn clear_search_spans(&mut self) {
        self.search_spans.clear();
    }

    /// Re-resolve all overlay colors for a new theme.
    ///
    /// Buffer and span geometry are untouched; only colors change.
    pub fn restyle(&mut self, theme: Theme) {
        restyle_spans(&mut self.spans, theme);
        restyle_spans(&mut self.search_spans, theme);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TextStats;

    fn state_for_tests() -> AppState {
        // Avoids touching the real config dir in tests.
        AppState {
            document: Document::new(),
            settings: Settings::default(),
            scheduler: RefreshScheduler::new(),
            refresher: PreviewRefresher::new(),
            preview_html: EMPTY_PREVIEW_HTML.to_string(),
            status_line: TextStats::default().status_line(),
            spans: Vec::new(),
            search_spans: Vec::new(),
        }
    }

    #[test]
    fn test_document_title_states() {
        let mut doc = Document::new();
        assert_eq!(doc.title(), "Citrine");

        doc.modified = true;
        assert_eq!(doc.title(), "* Citrine");

        let mut doc = Document::with_file(PathBuf::from("/notes/todo.md"), String::new());
        assert_eq!(doc.title(), "todo.md - Citrine");
        doc.modified = true;
        assert_eq!(doc.title(), "* todo.md - Citrine");
    }

    #[test]
    fn test_document_with_file_starts_clean() {
        let doc = Document::with_file(PathBuf::from("a.md"), "content".to_string());
        assert!(!doc.modified);
        assert_eq!(doc.content, "content");
    }

    #[test]
    fn test_transition_cancels_scheduler_and_snapshot() {
        use crate::preview::ComrakConverter;
        use std::time::{Duration, Instant};

        let mut state = state_for_tests();
        let converter = ComrakConverter::new();

        state.document.content = "stale".to_string();
        state
            .refresher
            .refresh("stale", state.settings.theme, &converter);
        state.scheduler.note_edit(Instant::now());

        state.begin_document_transition();
        assert!(!state.scheduler.is_pending());
        assert_eq!(state.refresher.last_content(), None);
        assert!(!state
            .scheduler
            .fire_due(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn test_overlay_spans_include_search_last() {
        let mut state = state_for_tests();
        state.set_search_spans(vec![Span::new(Tag::SearchMatch, 0, 3)]);
        let overlay = state.overlay_spans();
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0].span.tag, Tag::SearchMatch);

        state.clear_search_spans();
        assert!(state.overlay_spans().is_empty());
    }

    #[test]
    fn test_reset_surfaces_clears_everything() {
        let mut state = state_for_tests();
        state.preview_html = "<p>old</p>".to_string();
        state.status_line = "Ready | 3 chars | 1 words".to_string();
        state.set_search_spans(vec![Span::new(Tag::SearchMatch, 0, 1)]);

        state.reset_surfaces();
        assert_eq!(state.preview_html, EMPTY_PREVIEW_HTML);
        assert_eq!(state.status_line, TextStats::default().status_line());
        assert!(state.overlay_spans().is_empty());
    }
}
