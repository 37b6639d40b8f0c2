//! Markdown format insertion for the Tools menu and shortcuts
//!
//! Commands wrap the current selection in Markdown markers, or insert an
//! empty marker pair at the caret with the caret placed between the
//! delimiters. Pure string surgery over character offsets; the app applies
//! the result back to the text widget.

// ─────────────────────────────────────────────────────────────────────────────
// Format Command
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown formatting commands available from the Tools menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (`**text**`)
    Bold,
    /// Italic text (`*text*`)
    Italic,
    /// Heading level 1-6 (`# text`)
    Heading(u8),
    /// Link (`[text](url)`)
    Link,
    /// Image (`![alt](image-url)`)
    Image,
    /// Fenced code block
    CodeBlock,
    /// Bullet list item (`- text`)
    BulletList,
    /// Numbered list item (`1. text`)
    NumberedList,
    /// Block quote (`> text`)
    Quote,
}

impl FormatCommand {
    /// Marker pair inserted around the selection (or at the caret).
    fn markers(&self) -> (&'static str, &'static str) {
        match self {
            FormatCommand::Bold => ("**", "**"),
            FormatCommand::Italic => ("*", "*"),
            FormatCommand::Heading(1) => ("# ", ""),
            FormatCommand::Heading(2) => ("## ", ""),
            FormatCommand::Heading(3) => ("### ", ""),
            FormatCommand::Heading(4) => ("#### ", ""),
            FormatCommand::Heading(5) => ("##### ", ""),
            FormatCommand::Heading(_) => ("###### ", ""),
            FormatCommand::Link => ("[", "](url)"),
            FormatCommand::Image => ("![", "](image-url)"),
            FormatCommand::CodeBlock => ("```\n", "\n```"),
            FormatCommand::BulletList => ("- ", ""),
            FormatCommand::NumberedList => ("1. ", ""),
            FormatCommand::Quote => ("> ", ""),
        }
    }

    /// Menu label.
    pub fn label(&self) -> String {
        match self {
            FormatCommand::Bold => "Bold".to_string(),
            FormatCommand::Italic => "Italic".to_string(),
            FormatCommand::Heading(level) => format!("Heading {}", level),
            FormatCommand::Link => "Link".to_string(),
            FormatCommand::Image => "Image".to_string(),
            FormatCommand::CodeBlock => "Code Block".to_string(),
            FormatCommand::BulletList => "Bullet List".to_string(),
            FormatCommand::NumberedList => "Numbered List".to_string(),
            FormatCommand::Quote => "Quote".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// The new text
    pub text: String,
    /// New caret position (character index)
    pub cursor: usize,
    /// New selection covering the formatted run, if there was a selection
    pub selection: Option<(usize, usize)>,
}

/// Apply a formatting command to `text`.
///
/// `selection` is a character range; `start == end` means a bare caret.
/// With a selection, the selected run is wrapped in the command's markers
/// and reselected (markers included). With a bare caret, the marker pair is
/// inserted and the caret lands between the markers. Out-of-range offsets
/// are clamped, so the function is total.
pub fn apply_format(text: &str, selection: (usize, usize), command: FormatCommand) -> FormatResult {
    let (prefix, suffix) = command.markers();
    let char_count = text.chars().count();
    let start = selection.0.min(selection.1).min(char_count);
    let end = selection.0.max(selection.1).min(char_count);

    let byte_start = byte_offset(text, start);
    let byte_end = byte_offset(text, end);

    let mut result = String::with_capacity(text.len() + prefix.len() + suffix.len());
    result.push_str(&text[..byte_start]);
    result.push_str(prefix);
    result.push_str(&text[byte_start..byte_end]);
    result.push_str(suffix);
    result.push_str(&text[byte_end..]);

    let prefix_chars = prefix.chars().count();
    let suffix_chars = suffix.chars().count();

    if start == end {
        // Bare caret: land between the markers.
        FormatResult {
            text: result,
            cursor: start + prefix_chars,
            selection: None,
        }
    } else {
        // Reselect the whole formatted run, markers included.
        let new_end = end + prefix_chars + suffix_chars;
        FormatResult {
            text: result,
            cursor: new_end,
            selection: Some((start, new_end)),
        }
    }
}

/// Byte offset of a character index, clamped to the end of the text.
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
