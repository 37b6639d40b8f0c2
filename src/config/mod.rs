//! Configuration module for Citrine
//!
//! This module handles user preferences and application settings,
//! including serialization/deserialization to/from JSON and
//! persistent storage in the platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
