//! User settings and preferences for Citrine
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

// Allow dead code - theme helpers form a complete API for UI display even
// where not all are wired up
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the editor.
///
/// The set is closed: there is no stringly-typed dispatch, and a persisted
/// config naming an unknown theme fails deserialization and falls back to
/// the default (light) theme during config load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Clean light theme (default)
    #[default]
    Litera,
    /// Neon-on-dark
    Vapor,
    /// Flat dark
    Darkly,
    /// High-contrast dark
    Cyborg,
    /// Blue-tinted dark
    Superhero,
}

/// The light/dark grouping that decides which palette the style resolver
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFamily {
    Light,
    Dark,
}

impl Theme {
    /// All themes, in menu order.
    pub fn all() -> &'static [Theme] {
        &[
            Theme::Litera,
            Theme::Vapor,
            Theme::Darkly,
            Theme::Cyborg,
            Theme::Superhero,
        ]
    }

    /// The style family this theme belongs to.
    pub fn family(&self) -> ThemeFamily {
        match self {
            Theme::Litera => ThemeFamily::Light,
            Theme::Vapor | Theme::Darkly | Theme::Cyborg | Theme::Superhero => ThemeFamily::Dark,
        }
    }

    /// Whether this theme uses the dark palette.
    pub fn is_dark(&self) -> bool {
        self.family() == ThemeFamily::Dark
    }

    /// Display name for menus and the status bar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Litera => "litera",
            Theme::Vapor => "vapor",
            Theme::Darkly => "darkly",
            Theme::Cyborg => "cyborg",
            Theme::Superhero => "superhero",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// All user-configurable options.
///
/// Unknown fields in a persisted config are ignored and missing fields take
/// their defaults, so configs survive version changes in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active color theme
    pub theme: Theme,
    /// Whether edits automatically refresh the preview
    pub auto_preview: bool,
    /// Editor font size in points
    pub font_size: f32,
    /// Last window size
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            auto_preview: true,
            font_size: 14.0,
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    /// Clamp loaded values into usable ranges.
    ///
    /// A hand-edited config can contain out-of-range numbers; sanitizing on
    /// load keeps the UI usable without erroring out.
    pub fn sanitize(mut self) -> Self {
        self.font_size = self.font_size.clamp(8.0, 32.0);
        self.window_size.width = self.window_size.width.max(400.0);
        self.window_size.height = self.window_size.height.max(300.0);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_light_family() {
        assert_eq!(Theme::default(), Theme::Litera);
        assert_eq!(Theme::default().family(), ThemeFamily::Light);
    }

    #[test]
    fn test_dark_family_membership() {
        for theme in [Theme::Vapor, Theme::Darkly, Theme::Cyborg, Theme::Superhero] {
            assert!(theme.is_dark(), "{:?} should be dark", theme);
        }
        assert!(!Theme::Litera.is_dark());
    }

    #[test]
    fn test_theme_serde_round_trip() {
        for &theme in Theme::all() {
            let json = serde_json::to_string(&theme).unwrap();
            let back: Theme = serde_json::from_str(&json).unwrap();
            assert_eq!(theme, back);
        }
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Darkly).unwrap(), "\"darkly\"");
    }

    #[test]
    fn test_unknown_theme_fails_deserialization() {
        // Config load treats this as a parse failure and falls back to
        // defaults, i.e. the light theme.
        let result: Result<Theme, _> = serde_json::from_str("\"solarized\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Litera);
        assert!(settings.auto_preview);
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.window_size.width, 1200.0);
        assert_eq!(settings.window_size.height, 800.0);
    }

    #[test]
    fn test_settings_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"cyborg"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Cyborg);
        assert!(settings.auto_preview);
        assert_eq!(settings.font_size, 14.0);
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let settings = Settings {
            font_size: 200.0,
            window_size: WindowSize {
                width: 10.0,
                height: 10.0,
            },
            ..Settings::default()
        }
        .sanitize();
        assert_eq!(settings.font_size, 32.0);
        assert_eq!(settings.window_size.width, 400.0);
        assert_eq!(settings.window_size.height, 300.0);
    }
}
