//! Find panel
//!
//! A small window with a query field. Matches are case-insensitive literal
//! occurrences, highlighted in the editor through `search_match` overlay
//! spans; closing the panel clears them.

// Allow dead code - panel state accessors kept for API completeness
#![allow(dead_code)]

use crate::highlight::{search_matches, Span};
use eframe::egui::{self, Context, Key};

/// What the panel asks the application to do after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing changed
    Unchanged,
    /// Apply these match spans to the editor overlay
    Updated(Vec<Span>),
    /// Remove all search highlights
    Cleared,
}

/// State for the find panel.
#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    /// Whether the panel window is visible
    open: bool,
    /// Current query text
    query: String,
    /// Match count of the last executed search, None before the first run
    match_count: Option<usize>,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the panel (Ctrl+F, Edit menu).
    pub fn open_panel(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Re-run the active search against a changed buffer.
    ///
    /// Returns fresh spans when a search is currently applied, so the
    /// highlights track edits instead of going stale.
    pub fn resync(&mut self, buffer: &str) -> Option<Vec<Span>> {
        if self.open && self.match_count.is_some() && !self.query.is_empty() {
            let spans = search_matches(buffer, &self.query);
            self.match_count = Some(spans.len());
            Some(spans)
        } else {
            None
        }
    }

    /// Draw the panel and report what the app should do.
    pub fn show(&mut self, ctx: &Context, buffer: &str) -> SearchOutcome {
        if !self.open {
            return SearchOutcome::Unchanged;
        }

        let mut outcome = SearchOutcome::Unchanged;
        let mut keep_open = true;
        let mut close_clicked = false;

        egui::Window::new("Find")
            .open(&mut keep_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let response = ui.horizontal(|ui| {
                    ui.label("Find:");
                    ui.text_edit_singleline(&mut self.query)
                });
                let query_response = response.inner;

                let submitted = query_response.lost_focus()
                    && ui.input(|i| i.key_pressed(Key::Enter));

                ui.horizontal(|ui| {
                    if (ui.button("Find").clicked() || submitted) && !self.query.is_empty() {
                        let spans = search_matches(buffer, &self.query);
                        self.match_count = Some(spans.len());
                        outcome = SearchOutcome::Updated(spans);
                    }
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                });

                match self.match_count {
                    Some(0) => {
                        ui.label("No matches");
                    }
                    Some(n) => {
                        ui.label(format!(
                            "{} match{}",
                            n,
                            if n == 1 { "" } else { "es" }
                        ));
                    }
                    None => {}
                }
            });

        if !keep_open || close_clicked {
            self.open = false;
            self.match_count = None;
            outcome = SearchOutcome::Cleared;
        }
        outcome
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let panel = SearchPanel::new();
        assert!(!panel.is_open());
    }

    #[test]
    fn test_resync_only_when_search_applied() {
        let mut panel = SearchPanel::new();
        panel.query = "word".to_string();

        // Closed panel, or open panel with no executed search: no resync.
        assert!(panel.resync("word word").is_none());
        panel.open_panel();
        assert!(panel.resync("word word").is_none());

        // Once a search has run, edits re-run it.
        panel.match_count = Some(2);
        let spans = panel.resync("word here").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(panel.match_count, Some(1));
    }

    #[test]
    fn test_resync_with_empty_query_does_nothing() {
        let mut panel = SearchPanel::new();
        panel.open_panel();
        panel.match_count = Some(0);
        assert!(panel.resync("anything").is_none());
    }
}
