//! Theme System for Citrine
//!
//! This module is the style resolver: it maps highlight tags and the active
//! theme to concrete colors. Themes come in a fixed set (see
//! `config::Theme`), partitioned into two style families — light and dark —
//! that select between two fixed palettes. Switching themes is an
//! instantaneous full re-resolution; nothing blends or animates.
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::TagPalette;
//! use crate::highlight::Tag;
//!
//! let palette = TagPalette::resolve(settings.theme);
//! let style = palette.style(Tag::Header);
//! ```

use crate::config::{Theme, ThemeFamily};
use crate::highlight::Tag;
use eframe::egui::{Color32, Context, Visuals};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Tag Style
// ─────────────────────────────────────────────────────────────────────────────

/// Concrete visual attributes for one highlight tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagStyle {
    /// Text color
    pub foreground: Color32,
    /// Fill behind the text, if the tag has one (code, search matches)
    pub background: Option<Color32>,
}

impl TagStyle {
    /// Foreground-only style.
    const fn fg(foreground: Color32) -> Self {
        Self {
            foreground,
            background: None,
        }
    }

    /// Foreground plus background fill.
    const fn filled(foreground: Color32, background: Color32) -> Self {
        Self {
            foreground,
            background: Some(background),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tag Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Per-tag colors for one theme family.
///
/// Resolution is total and constant-time: every tag has an entry in both
/// palettes, and any theme resolves to exactly one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPalette {
    pub header: TagStyle,
    pub bold: TagStyle,
    pub italic: TagStyle,
    pub code_block: TagStyle,
    pub code_inline: TagStyle,
    pub link: TagStyle,
    pub list: TagStyle,
    pub quote: TagStyle,
    pub search_match: TagStyle,
}

impl TagPalette {
    /// Resolve the palette for a theme via its family.
    pub fn resolve(theme: Theme) -> Self {
        match theme.family() {
            ThemeFamily::Light => Self::light(),
            ThemeFamily::Dark => Self::dark(),
        }
    }

    /// Light family palette.
    pub fn light() -> Self {
        Self {
            header: TagStyle::fg(Color32::from_rgb(0, 102, 204)),
            bold: TagStyle::fg(Color32::from_rgb(204, 0, 0)),
            italic: TagStyle::fg(Color32::from_rgb(0, 204, 0)),
            code_block: TagStyle::filled(
                Color32::from_rgb(0, 0, 0),
                Color32::from_rgb(240, 240, 240),
            ),
            code_inline: TagStyle::filled(
                Color32::from_rgb(0, 0, 0),
                Color32::from_rgb(232, 232, 232),
            ),
            link: TagStyle::fg(Color32::from_rgb(204, 102, 0)),
            list: TagStyle::fg(Color32::from_rgb(153, 0, 204)),
            quote: TagStyle::fg(Color32::from_rgb(0, 102, 153)),
            search_match: TagStyle::filled(
                Color32::from_rgb(0, 0, 0),
                Color32::from_rgb(255, 255, 0),
            ),
        }
    }

    /// Dark family palette.
    pub fn dark() -> Self {
        Self {
            header: TagStyle::fg(Color32::from_rgb(102, 204, 255)),
            bold: TagStyle::fg(Color32::from_rgb(255, 102, 102)),
            italic: TagStyle::fg(Color32::from_rgb(102, 255, 102)),
            code_block: TagStyle::filled(
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(42, 42, 42),
            ),
            code_inline: TagStyle::filled(
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(58, 58, 58),
            ),
            link: TagStyle::fg(Color32::from_rgb(255, 204, 102)),
            list: TagStyle::fg(Color32::from_rgb(204, 153, 255)),
            quote: TagStyle::fg(Color32::from_rgb(153, 204, 255)),
            search_match: TagStyle::filled(
                Color32::from_rgb(0, 0, 0),
                Color32::from_rgb(255, 255, 0),
            ),
        }
    }

    /// Style for a tag.
    pub fn style(&self, tag: Tag) -> TagStyle {
        match tag {
            Tag::Header => self.header,
            Tag::Bold => self.bold,
            Tag::Italic => self.italic,
            Tag::CodeBlock => self.code_block,
            Tag::CodeInline => self.code_inline,
            Tag::Link => self.link,
            Tag::List => self.list,
            Tag::Quote => self.quote,
            Tag::SearchMatch => self.search_match,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Base colors for the text surface itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorColors {
    /// Editor background
    pub background: Color32,
    /// Untagged text color
    pub foreground: Color32,
    /// Caret color
    pub caret: Color32,
}

impl EditorColors {
    /// Resolve the editor colors for a theme via its family.
    pub fn resolve(theme: Theme) -> Self {
        match theme.family() {
            ThemeFamily::Light => Self::light(),
            ThemeFamily::Dark => Self::dark(),
        }
    }

    /// Light family editor colors.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            foreground: Color32::from_rgb(0, 0, 0),
            caret: Color32::from_rgb(0, 0, 0),
        }
    }

    /// Dark family editor colors.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(45, 45, 45),
            foreground: Color32::from_rgb(255, 255, 255),
            caret: Color32::from_rgb(255, 255, 255),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// egui Visuals
// ─────────────────────────────────────────────────────────────────────────────

/// Apply the theme to the egui context.
///
/// Builds on egui's stock light/dark visuals so widget chrome stays
/// consistent, overriding the surfaces the editor draws on.
pub fn apply_visuals(ctx: &Context, theme: Theme) {
    let editor = EditorColors::resolve(theme);
    let mut visuals = match theme.family() {
        ThemeFamily::Light => Visuals::light(),
        ThemeFamily::Dark => Visuals::dark(),
    };
    visuals.extreme_bg_color = editor.background;
    visuals.text_cursor.stroke.color = editor.caret;
    debug!("Applied visuals for theme {:?}", theme);
    ctx.set_visuals(visuals);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_family_resolves_dark_palette() {
        for theme in [Theme::Vapor, Theme::Darkly, Theme::Cyborg, Theme::Superhero] {
            assert_eq!(TagPalette::resolve(theme), TagPalette::dark(), "{:?}", theme);
        }
    }

    #[test]
    fn test_light_theme_resolves_light_palette() {
        assert_eq!(TagPalette::resolve(Theme::Litera), TagPalette::light());
        // The default theme is in the light family.
        assert_eq!(TagPalette::resolve(Theme::default()), TagPalette::light());
    }

    #[test]
    fn test_every_tag_has_a_style_in_both_palettes() {
        for palette in [TagPalette::light(), TagPalette::dark()] {
            for tag in Tag::ALL {
                // style() is total; foreground is always set.
                let style = palette.style(tag);
                assert_ne!(style.foreground, Color32::TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_palettes_differ_per_family() {
        let light = TagPalette::light();
        let dark = TagPalette::dark();
        for tag in [Tag::Header, Tag::Bold, Tag::Italic, Tag::Link, Tag::Quote] {
            assert_ne!(light.style(tag).foreground, dark.style(tag).foreground);
        }
    }

    #[test]
    fn test_code_and_search_styles_have_backgrounds() {
        for palette in [TagPalette::light(), TagPalette::dark()] {
            assert!(palette.style(Tag::CodeBlock).background.is_some());
            assert!(palette.style(Tag::CodeInline).background.is_some());
            assert!(palette.style(Tag::SearchMatch).background.is_some());
            assert!(palette.style(Tag::Bold).background.is_none());
        }
    }

    #[test]
    fn test_search_match_identical_across_families() {
        assert_eq!(
            TagPalette::light().style(Tag::SearchMatch),
            TagPalette::dark().style(Tag::SearchMatch)
        );
    }

    #[test]
    fn test_editor_colors_contrast() {
        let light = EditorColors::light();
        assert!(light.background.r() > 200);
        assert!(light.foreground.r() < 50);

        let dark = EditorColors::dark();
        assert!(dark.background.r() < 64);
        assert!(dark.foreground.r() > 200);
    }

    #[test]
    fn test_editor_colors_follow_family() {
        assert_eq!(EditorColors::resolve(Theme::Litera), EditorColors::light());
        assert_eq!(EditorColors::resolve(Theme::Darkly), EditorColors::dark());
    }
}
