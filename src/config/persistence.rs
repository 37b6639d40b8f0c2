//! Configuration file persistence for Citrine
//!
//! This module handles loading and saving the settings file in the
//! platform config directory, with graceful fallback to defaults when the
//! file is missing or unreadable.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "citrine";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\citrine\`
/// - **macOS**: `~/Library/Application Support/citrine/`
/// - **Linux**: `~/.config/citrine/`
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from the default config file location.
///
/// Never fails: a missing file yields defaults silently, and an unreadable
/// or unparsable file (including one naming an unknown theme) logs a
/// warning and yields defaults.
pub fn load_config() -> Settings {
    match get_config_file_path() {
        Ok(path) => load_config_from(&path).unwrap_or_warn_default(
            Settings::default(),
            "Failed to load settings",
        ),
        Err(err) => {
            warn!("Config directory unavailable: {}. Using defaults.", err);
            Settings::default()
        }
    }
}

/// Load settings from a specific path.
///
/// A missing file is not an error; it returns defaults.
pub fn load_config_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let settings: Settings = serde_json::from_str(&raw)?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings.sanitize())
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save settings to the default config file location.
pub fn save_config(settings: &Settings) -> Result<()> {
    let dir = get_config_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| Error::ConfigSave {
            path: dir.clone(),
            source: Box::new(e),
        })?;
    }
    let path = dir.join(CONFIG_FILE_NAME);
    save_config_to(&path, settings)?;
    info!("Saved settings to {}", path.display());
    Ok(())
}

/// Save settings to a specific path.
pub fn save_config_to(path: &Path, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// Save settings, logging instead of returning on failure.
///
/// Used on shutdown and other paths where the caller has no way to surface
/// the error.
pub fn save_config_silent(settings: &Settings) {
    if let Err(err) = save_config(settings) {
        warn!("Failed to save settings: {}", err);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut settings = Settings::default();
        settings.theme = Theme::Cyborg;
        settings.auto_preview = false;

        save_config_to(&path, &settings).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_unknown_theme_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"theme":"solarized"}"#).unwrap();
        // The caller (load_config) maps this to defaults, i.e. light.
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_loaded_settings_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"font_size":1000.0}"#).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.font_size, 32.0);
    }
}
