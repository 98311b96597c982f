//! Batch options and event sinks
//!
//! Sinks are plain callbacks so the batch never depends on how the caller
//! renders progress. They may be invoked from a worker task.

use std::sync::Arc;

/// Progress callback, receives a percentage in [0, 100]
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Log callback, receives one human-readable line per event
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Overwrite behavior for an existing output file
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OverwriteBehavior {
    /// Truncate and rewrite the file on every run (default)
    #[default]
    Force,
    /// Never overwrite, fail if file exists
    NeverOverwrite,
}

/// Options for batch runs
#[derive(Clone, Default)]
pub struct BatchOptions {
    /// Optional progress sink
    pub progress: Option<ProgressCallback>,

    /// Optional log sink
    pub log: Option<LogCallback>,

    /// Behavior when the output file already exists
    pub overwrite: OverwriteBehavior,
}

impl BatchOptions {
    pub(crate) fn emit_progress(&self, percent: f64) {
        if let Some(ref progress) = self.progress {
            progress(percent);
        }
    }

    pub(crate) fn emit_log(&self, line: &str) {
        if let Some(ref log) = self.log {
            log(line);
        }
    }
}

impl std::fmt::Debug for BatchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchOptions")
            .field("progress", &self.progress.is_some())
            .field("log", &self.log.is_some())
            .field("overwrite", &self.overwrite)
            .finish()
    }
}
