//! The debounced preview-refresh pipeline
//!
//! This module is the temporal heart of the editor: it decides *when* the
//! expensive work runs (trailing-edge debounce over edit events) and *what*
//! a refresh produces (HTML for the preview pane, counts for the status
//! bar, styled spans for the editor overlay), while suppressing redundant
//! work when the buffer has not actually changed.

mod pipeline;
mod scheduler;

pub use pipeline::{restyle_spans, PreviewRefresher, RefreshOutput, StyledSpan};
pub use scheduler::{RefreshScheduler, REFRESH_QUIET_PERIOD};
