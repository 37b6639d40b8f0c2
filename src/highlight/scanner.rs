//! The highlighter: full-buffer scan producing tagged spans
//!
//! `highlight` is a pure function of the buffer content: deterministic,
//! total, and recomputed wholesale on every call. There is no incremental
//! re-scan of changed regions; callers replace their previous span set with
//! the new one.

use super::rules::{rules, RuleSet};
use super::{Span, Tag};
use log::debug;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Character Offset Table
// ─────────────────────────────────────────────────────────────────────────────

/// Byte→character offset conversion for one buffer snapshot.
///
/// Regex matches report byte offsets; spans are published in character
/// offsets so the UI layer never has to care about UTF-8 widths.
struct CharOffsets {
    /// Byte offset of every character, plus a trailing sentinel at `len()`
    boundaries: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Character index for a byte offset.
    ///
    /// Match offsets always land on character boundaries, so the exact
    /// lookup succeeds; the insertion point is a total fallback.
    fn char_index(&self, byte: usize) -> usize {
        self.boundaries
            .binary_search(&byte)
            .unwrap_or_else(|insert| insert)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Highlight Pass
// ─────────────────────────────────────────────────────────────────────────────

/// Scan the full buffer and produce the tagged span set.
///
/// Runs the fixed rule pipeline from `rules.rs` in order. A region may end
/// up carrying several tags (a quote line containing bold text, bold and
/// italic layered inside `***both***`); that layering is intentional. The
/// result is sorted by (start, end, tag) so identical content always yields
/// an identical span list.
pub fn highlight(text: &str) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }

    let rules = rules();
    let offsets = CharOffsets::new(text);
    let mut spans = Vec::new();

    collect(&rules.header, text, Tag::Header, &offsets, &mut spans);
    collect_emphasis(rules, text, &offsets, &mut spans);
    collect(&rules.code_block, text, Tag::CodeBlock, &offsets, &mut spans);
    collect(&rules.code_inline, text, Tag::CodeInline, &offsets, &mut spans);
    collect(&rules.link, text, Tag::Link, &offsets, &mut spans);
    collect(&rules.list_marker, text, Tag::List, &offsets, &mut spans);
    collect(&rules.quote, text, Tag::Quote, &offsets, &mut spans);

    spans.sort_unstable_by_key(|s| (s.start, s.end, s.tag));
    debug!("highlight: {} spans over {} chars", spans.len(), offsets.boundaries.len() - 1);
    spans
}

/// Append every non-empty match of `pattern` as a span with `tag`.
fn collect(pattern: &Regex, text: &str, tag: Tag, offsets: &CharOffsets, out: &mut Vec<Span>) {
    for m in pattern.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        out.push(Span::new(
            tag,
            offsets.char_index(m.start()),
            offsets.char_index(m.end()),
        ));
    }
}

/// The overlap-sensitive emphasis passes.
///
/// Each delimiter family (stars, underscores) scans strongest-first; regions
/// claimed by a stronger delimiter exclude weaker matches that overlap them
/// at any offset. This replaces the lookaround assertions a backtracking
/// engine would use: without it, `*(.*?)*` would re-match the delimiter
/// halves of every `**bold**`.
fn collect_emphasis(rules: &RuleSet, text: &str, offsets: &CharOffsets, out: &mut Vec<Span>) {
    // Star family: ***both*** claims first, then **bold**, then *italic*.
    let mut claimed: Vec<(usize, usize)> = Vec::new();
    for m in rules.bold_italic.find_iter(text) {
        let range = (offsets.char_index(m.start()), offsets.char_index(m.end()));
        out.push(Span::new(Tag::Bold, range.0, range.1));
        out.push(Span::new(Tag::Italic, range.0, range.1));
        claimed.push(range);
    }
    for m in rules.bold.find_iter(text) {
        let range = (offsets.char_index(m.start()), offsets.char_index(m.end()));
        if overlaps_any(&claimed, range) {
            continue;
        }
        out.push(Span::new(Tag::Bold, range.0, range.1));
        claimed.push(range);
    }
    for m in rules.italic.find_iter(text) {
        let range = (offsets.char_index(m.start()), offsets.char_index(m.end()));
        if overlaps_any(&claimed, range) {
            continue;
        }
        out.push(Span::new(Tag::Italic, range.0, range.1));
    }

    // Underscore family: __bold__ claims, then _italic_.
    let mut claimed: Vec<(usize, usize)> = Vec::new();
    for m in rules.bold_underscore.find_iter(text) {
        let range = (offsets.char_index(m.start()), offsets.char_index(m.end()));
        out.push(Span::new(Tag::Bold, range.0, range.1));
        claimed.push(range);
    }
    for m in rules.italic_underscore.find_iter(text) {
        let range = (offsets.char_index(m.start()), offsets.char_index(m.end()));
        if overlaps_any(&claimed, range) {
            continue;
        }
        out.push(Span::new(Tag::Italic, range.0, range.1));
    }
}

/// Whether `range` shares any offset with a claimed region.
fn overlaps_any(claimed: &[(usize, usize)], range: (usize, usize)) -> bool {
    claimed
        .iter()
        .any(|&(start, end)| range.0 < end && start < range.1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Matches
// ─────────────────────────────────────────────────────────────────────────────

/// Find all case-insensitive literal occurrences of `query`.
///
/// Produces `SearchMatch` spans for the overlay; matches do not overlap
/// (the scan resumes after each hit). Case folding is done character by
/// character with an index map back to the original text, so folds that
/// change the character count cannot misalign the highlight.
pub fn search_matches(text: &str, query: &str) -> Vec<Span> {
    if text.is_empty() || query.is_empty() {
        return Vec::new();
    }

    let mut folded: Vec<char> = Vec::new();
    let mut origin: Vec<usize> = Vec::new();
    for (index, ch) in text.chars().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }
    let needle: Vec<char> = query.chars().flat_map(|c| c.to_lowercase()).collect();

    let mut spans = Vec::new();
    if needle.is_empty() || needle.len() > folded.len() {
        return spans;
    }

    let mut i = 0;
    while i + needle.len() <= folded.len() {
        if folded[i..i + needle.len()] == needle[..] {
            let start = origin[i];
            let end = origin[i + needle.len() - 1] + 1;
            spans.push(Span::new(Tag::SearchMatch, start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    spans
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
