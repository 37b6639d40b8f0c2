//! Editor module for Citrine
//!
//! This module contains the pieces behind the raw text surface: document
//! statistics for the status bar, Markdown format insertion for the Tools
//! menu, and the layout overlay that paints highlight spans.

mod format;
mod overlay;
mod stats;

pub use format::{apply_format, FormatCommand, FormatResult};
pub use overlay::overlay_layout_job;
pub use stats::TextStats;
