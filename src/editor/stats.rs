//! Text statistics for the status bar
//!
//! Counts are recomputed as part of every preview refresh and displayed in
//! the status bar.

// ─────────────────────────────────────────────────────────────────────────────
// TextStats
// ─────────────────────────────────────────────────────────────────────────────

/// Character and word counts for a document.
///
/// A word is a maximal run of non-whitespace characters; characters are
/// Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of words
    pub words: usize,
    /// Number of characters including whitespace
    pub characters: usize,
}

impl TextStats {
    /// Calculate statistics from the given text in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self::default();
        let mut in_word = false;

        for ch in text.chars() {
            stats.characters += 1;
            if ch.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                stats.words += 1;
            }
        }

        stats
    }

    /// Format for the status bar, e.g. `"Ready | 892 chars | 150 words"`.
    pub fn status_line(&self) -> String {
        format!("Ready | {} chars | {} words", self.characters, self.words)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
    }

    #[test]
    fn test_simple_sentence() {
        let stats = TextStats::from_text("Hello, World!");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 13);
    }

    #[test]
    fn test_words_are_nonwhitespace_runs() {
        // Punctuation sticks to its run; mixed whitespace separates.
        let stats = TextStats::from_text("one  two\t\tthree\nfour...");
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn test_only_whitespace() {
        let stats = TextStats::from_text("   \n\n \t ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 8);
    }

    #[test]
    fn test_unicode_characters_counted_once() {
        let stats = TextStats::from_text("日本語 テスト");
        assert_eq!(stats.characters, 7);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_markdown_markers_count_as_words() {
        let stats = TextStats::from_text("# Title\n\n**bold** text");
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn test_status_line_format() {
        let stats = TextStats {
            words: 150,
            characters: 892,
        };
        assert_eq!(stats.status_line(), "Ready | 892 chars | 150 words");
    }
}
