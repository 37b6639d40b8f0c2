//! Centralized error handling for Citrine
//!
//! This module provides a unified error type covering the failure scenarios
//! the application can hit: document file I/O and configuration persistence.
//! The highlighting/refresh core is total and never returns errors.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Document File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read a document from disk
    FileRead { path: PathBuf, source: io::Error },

    /// Failed to write a document to disk
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load the settings file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save the settings file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse the settings file (invalid JSON)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load settings from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save settings to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid settings format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } => Some(source),
            Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_file_read_error_display() {
        let err = Error::FileRead {
            path: PathBuf::from("/notes/todo.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Failed to read"));
        assert!(msg.contains("todo.md"));
    }

    #[test]
    fn test_file_write_error() {
        let path = PathBuf::from("/test/file.md");
        let io_err = io::Error::new(io::ErrorKind::Other, "write failed");
        let err = Error::FileWrite {
            path: path.clone(),
            source: io_err,
        };
        assert!(matches!(err, Error::FileWrite { path: p, .. } if p == path));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(format!("{}", err), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as StdError;

        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert!(err.source().is_some());

        let err = Error::ConfigDirNotFound;
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        use super::ResultExt;

        let ok: super::Result<i32> = Ok(42);
        assert_eq!(ok.unwrap_or_warn_default(0, "test context"), 42);

        let err: super::Result<i32> = Err(Error::ConfigDirNotFound);
        assert_eq!(err.unwrap_or_warn_default(0, "test context"), 0);
    }
}
