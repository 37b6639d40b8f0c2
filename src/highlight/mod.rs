//! Markdown syntax highlighting for the raw editor view
//!
//! This module scans the full buffer text against a fixed, ordered set of
//! pattern rules and produces tagged spans that the editor surface paints
//! as a color overlay.
//!
//! # Features
//! - Closed set of highlight tags (headers, emphasis, code, links, ...)
//! - Ordered rule pipeline with layered, overlapping tags
//! - Interval-based emphasis exclusion (no lookaround needed)
//! - Character-offset spans, independent of UTF-8 byte positions
//!
//! # Example
//! ```ignore
//! use crate::highlight::{highlight, Span, Tag};
//!
//! let spans = highlight("# Title\n\nSome **bold** text");
//! assert!(spans.iter().any(|s| s.tag == Tag::Bold));
//! ```

// Allow dead code - tag and span helpers form a complete API even where the
// app only consumes part of it
#![allow(dead_code)]

mod rules;
mod scanner;

pub use scanner::{highlight, search_matches};

// ─────────────────────────────────────────────────────────────────────────────
// Tag
// ─────────────────────────────────────────────────────────────────────────────

/// The closed set of highlight tags.
///
/// A region of text may carry several tags at once (e.g. bold and italic
/// inside `***both***`). Declaration order doubles as overlay priority:
/// when overlapping tags disagree on a color, the later variant wins, with
/// search matches painting over everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// ATX heading line (`# ...` through `###### ...`)
    Header,
    /// Strong emphasis (`**bold**`, `__bold__`)
    Bold,
    /// Emphasis (`*italic*`, `_italic_`)
    Italic,
    /// Fenced code block (``` ... ```)
    CodeBlock,
    /// Inline code span (`` `code` ``)
    CodeInline,
    /// Link (`[text](target)`)
    Link,
    /// List item marker (bullet or numbered) at line start
    List,
    /// Block quote marker line (`> ...`)
    Quote,
    /// Active search match (from the search panel, not the rule set)
    SearchMatch,
}

impl Tag {
    /// All tags, in overlay priority order.
    pub const ALL: [Tag; 9] = [
        Tag::Header,
        Tag::Bold,
        Tag::Italic,
        Tag::CodeBlock,
        Tag::CodeInline,
        Tag::Link,
        Tag::List,
        Tag::Quote,
        Tag::SearchMatch,
    ];

    /// Stable identifier, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Header => "header",
            Tag::Bold => "bold",
            Tag::Italic => "italic",
            Tag::CodeBlock => "code_block",
            Tag::CodeInline => "code_inline",
            Tag::Link => "link",
            Tag::List => "list",
            Tag::Quote => "quote",
            Tag::SearchMatch => "search_match",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Span
// ─────────────────────────────────────────────────────────────────────────────

/// A tagged region of the buffer.
///
/// Offsets are in characters, half-open (`start..end`). Spans are derived
/// data: every highlight pass recomputes them wholesale and the previous
/// set is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Which rule matched
    pub tag: Tag,
    /// First character of the match
    pub start: usize,
    /// One past the last character of the match
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(tag: Tag, start: usize, end: usize) -> Self {
        Self { tag, start, end }
    }

    /// Length of the span in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_priority_order() {
        // Search matches must outrank every rule tag in the overlay.
        for tag in Tag::ALL {
            assert!(tag <= Tag::SearchMatch);
        }
        assert!(Tag::Header < Tag::Bold);
        assert!(Tag::Bold < Tag::Italic);
    }

    #[test]
    fn test_tag_identifiers_unique() {
        let names: std::collections::HashSet<&str> =
            Tag::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names.len(), Tag::ALL.len());
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(Tag::Bold, 3, 10);
        assert_eq!(span.len(), 7);
        assert!(!span.is_empty());
        assert!(Span::new(Tag::Bold, 5, 5).is_empty());
    }
}
