//! The tag rule set: fixed, ordered pattern→tag catalog
//!
//! Patterns are compiled once into a process-wide [`RuleSet`] and reused by
//! every highlight pass. The scan order is fixed; later passes may add tags
//! to regions earlier passes already tagged, but never remove them:
//!
//!  0. ATX header line
//!  1. triple-star emphasis (bold + italic together)
//!  2. double-star bold
//!  3. single-star italic (excluded where 1/2 already claimed the region)
//!  4. double-underscore bold
//!  5. single-underscore italic (excluded where 4 claimed the region)
//!  6. fenced code block (multi-line, greedy-minimal between fences)
//!  7. inline code span (single line, no embedded backtick)
//!  8. link
//!  9. list item marker at line start
//! 10. block quote line
//!
//! The `regex` crate has no lookaround, so the emphasis exclusions in steps
//! 3 and 5 are interval-overlap checks in the scanner rather than regex
//! assertions.

use regex::Regex;
use std::sync::OnceLock;

/// Compiled patterns for every highlight rule.
pub(crate) struct RuleSet {
    /// `# heading` through `###### heading`
    pub header: Regex,
    /// `***bold italic***`
    pub bold_italic: Regex,
    /// `**bold**`
    pub bold: Regex,
    /// `*italic*`
    pub italic: Regex,
    /// `__bold__`
    pub bold_underscore: Regex,
    /// `_italic_`
    pub italic_underscore: Regex,
    /// ``` fenced block, across lines
    pub code_block: Regex,
    /// `` `inline code` ``, single line
    pub code_inline: Regex,
    /// `[text](target)`
    pub link: Regex,
    /// Bullet (`*`, `+`, `-`) or numbered (`1.`) marker at line start
    pub list_marker: Regex,
    /// `> quoted` line
    pub quote: Regex,
}

impl RuleSet {
    fn compile() -> Self {
        // Patterns are literals known to be valid; a compile failure here is
        // a programming error, caught by the tests below.
        let re = |pattern: &str| Regex::new(pattern).expect("invalid highlight pattern");
        Self {
            header: re(r"(?m)^#{1,6}[ \t]+.+$"),
            bold_italic: re(r"\*\*\*(.*?)\*\*\*"),
            bold: re(r"\*\*(.*?)\*\*"),
            italic: re(r"\*(.*?)\*"),
            bold_underscore: re(r"__(.*?)__"),
            italic_underscore: re(r"_(.*?)_"),
            code_block: re(r"(?s)```.*?```"),
            code_inline: re(r"`[^`\n]+`"),
            link: re(r"\[.*?\]\([^)]*\)"),
            list_marker: re(r"(?m)^[\t ]*(?:[*+-]|\d+\.)[ \t]+"),
            quote: re(r"(?m)^>.*$"),
        }
    }
}

/// Process-wide rule set, compiled on first use.
static RULES: OnceLock<RuleSet> = OnceLock::new();

/// Get the compiled rule set.
pub(crate) fn rules() -> &'static RuleSet {
    RULES.get_or_init(RuleSet::compile)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
