//! Markdown-to-HTML conversion for the preview pane
//!
//! The refresh pipeline treats the converter as an opaque pure function
//! `render(text) -> html` behind the [`MarkdownConverter`] trait; the
//! production implementation wraps comrak, a CommonMark + GFM compatible
//! parser. Tests substitute counting mocks to assert how often the
//! conversion actually runs.

use comrak::{markdown_to_html, Options};

// ─────────────────────────────────────────────────────────────────────────────
// Converter Trait
// ─────────────────────────────────────────────────────────────────────────────

/// An opaque Markdown-to-HTML converter.
///
/// Implementations must be total and side-effect-free: any input text maps
/// to some HTML string.
pub trait MarkdownConverter {
    fn render(&self, markdown: &str) -> String;
}

/// HTML shown in the preview pane before any content exists.
pub const EMPTY_PREVIEW_HTML: &str =
    "<h1>Markdown Preview</h1><p>Start typing to see the preview...</p>";

// ─────────────────────────────────────────────────────────────────────────────
// Comrak Converter
// ─────────────────────────────────────────────────────────────────────────────

/// The production converter, backed by comrak.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakConverter;

impl ComrakConverter {
    pub fn new() -> Self {
        Self
    }

    /// Conversion options.
    ///
    /// Tables, strikethrough, autolinks, and task lists are on, and
    /// `hardbreaks` turns every newline into a `<br>` so the preview tracks
    /// the buffer line for line.
    fn options() -> Options {
        let mut options = Options::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.render.hardbreaks = true;
        options
    }
}

impl MarkdownConverter for ComrakConverter {
    fn render(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return EMPTY_PREVIEW_HTML.to_string();
        }
        markdown_to_html(markdown, &Self::options())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_renders_placeholder() {
        let converter = ComrakConverter::new();
        assert_eq!(converter.render(""), EMPTY_PREVIEW_HTML);
    }

    #[test]
    fn test_renders_headers() {
        let html = ComrakConverter::new().render("# Title");
        assert!(html.contains("<h1"));
        assert!(html.contains("Title"));
    }

    #[test]
    fn test_renders_emphasis() {
        let html = ComrakConverter::new().render("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_renders_fenced_and_inline_code() {
        let converter = ComrakConverter::new();
        let html = converter.render("```\nlet x = 1;\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("<code"));

        let html = converter.render("use `cargo`");
        assert!(html.contains("<code>cargo</code>"));
    }

    #[test]
    fn test_renders_tables() {
        let html = ComrakConverter::new().render("| a | b |\n| - | - |\n| 1 | 2 |");
        assert!(html.contains("<table"));
    }

    #[test]
    fn test_newline_becomes_hard_break() {
        let html = ComrakConverter::new().render("first\nsecond");
        assert!(html.contains("<br"));
    }
}
