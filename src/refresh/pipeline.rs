//! Refresh orchestration: converter, counts, and highlight in one step
//!
//! When the scheduler fires, [`PreviewRefresher::refresh`] reads the current
//! buffer and either early-exits (content unchanged since the last render)
//! or produces everything the UI surfaces need in a single synchronous
//! call, so the preview, status bar, and editor overlay can never be
//! observed out of step with each other.

// Allow dead code - the refresher exposes its snapshot for inspection even
// where the app only drives refresh/reset
#![allow(dead_code)]

use crate::config::Theme;
use crate::editor::TextStats;
use crate::highlight::{highlight, Span};
use crate::preview::MarkdownConverter;
use crate::theme::{TagPalette, TagStyle};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Styled Spans
// ─────────────────────────────────────────────────────────────────────────────

/// A highlight span with its resolved visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    pub span: Span,
    pub style: TagStyle,
}

/// Re-resolve span styles for a new theme.
///
/// Theme switches change colors only: the buffer and the span geometry stay
/// untouched, so no re-scan or re-render is needed.
pub fn restyle_spans(spans: &mut [StyledSpan], theme: Theme) {
    let palette = TagPalette::resolve(theme);
    for styled in spans.iter_mut() {
        styled.style = palette.style(styled.span.tag);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Refresh Output
// ─────────────────────────────────────────────────────────────────────────────

/// Everything one refresh hands to the UI surfaces.
#[derive(Debug, Clone)]
pub struct RefreshOutput {
    /// Converted HTML for the preview pane
    pub html: String,
    /// Counts for the status bar
    pub stats: TextStats,
    /// Styled spans for the editor overlay
    pub spans: Vec<StyledSpan>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Refresher
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the refresh pipeline, suppressing work for unchanged content.
///
/// Holds the last-rendered buffer snapshot. `last_content` starts cleared
/// and is cleared again on new/open/close, so the first refresh after a
/// document transition always does real work.
#[derive(Debug, Clone, Default)]
pub struct PreviewRefresher {
    /// Buffer content as of the last completed refresh
    last_content: Option<String>,
}

impl PreviewRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one refresh over `content`.
    ///
    /// Returns `None` without touching the converter when the content is
    /// unchanged since the last completed refresh. Otherwise converts to
    /// HTML, computes counts, highlights, resolves styles for the active
    /// theme, records the snapshot, and returns the complete output. The
    /// call is idempotent: refreshing the same content twice does the work
    /// once.
    pub fn refresh(
        &mut self,
        content: &str,
        theme: Theme,
        converter: &dyn MarkdownConverter,
    ) -> Option<RefreshOutput> {
        if self.last_content.as_deref() == Some(content) {
            debug!("refresh skipped: content unchanged");
            return None;
        }

        let html = converter.render(content);
        let stats = TextStats::from_text(content);
        let palette = TagPalette::resolve(theme);
        let spans = highlight(content)
            .into_iter()
            .map(|span| StyledSpan {
                span,
                style: palette.style(span.tag),
            })
            .collect();

        self.last_content = Some(content.to_string());
        debug!("refresh: {} chars, {} words", stats.characters, stats.words);
        Some(RefreshOutput { html, stats, spans })
    }

    /// Forget the last-rendered snapshot.
    ///
    /// Called on new/open/close so the next refresh renders unconditionally.
    pub fn reset(&mut self) {
        self.last_content = None;
    }

    /// The last-rendered buffer snapshot, if any.
    pub fn last_content(&self) -> Option<&str> {
        self.last_content.as_deref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
