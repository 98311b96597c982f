//! CLI-specific progress handling for transcript-dl
//!
//! The batch runs on a worker task; its sinks forward events over a channel
//! and the main task renders them here.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedSender;
use transcript_dl::{BatchOptions, OverwriteBehavior};

/// Event forwarded from the batch worker to the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Progress(f64),
    Log(String),
}

/// Build batch options whose sinks forward into `tx`
///
/// Send errors are ignored: they only happen once the renderer has gone away.
pub fn channel_options(tx: UnboundedSender<BatchEvent>, overwrite: OverwriteBehavior) -> BatchOptions {
    let progress_tx = tx.clone();
    BatchOptions {
        progress: Some(Arc::new(move |percent: f64| {
            let _ = progress_tx.send(BatchEvent::Progress(percent));
        })),
        log: Some(Arc::new(move |line: &str| {
            let _ = tx.send(BatchEvent::Log(line.to_string()));
        })),
        overwrite,
    }
}

/// Creates a percentage progress bar for CLI display
pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos:>3}% {msg}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}

/// Progress manager for a batch run
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(message: &str) -> Self {
        let pb = create_progress_bar();

        // Print initial message to stderr
        eprintln!("{}", message);

        Self { pb }
    }

    /// Render one event: progress moves the bar, log lines print above it
    pub fn handle(&self, event: BatchEvent) {
        match event {
            BatchEvent::Progress(percent) => {
                self.pb.set_position(percent.clamp(0.0, 100.0).round() as u64);
            }
            // A hidden bar (stderr not a terminal) swallows println
            BatchEvent::Log(line) if self.pb.is_hidden() => eprintln!("{line}"),
            BatchEvent::Log(line) => self.pb.println(line),
        }
    }

    pub fn finish(&self, message: &'static str) {
        self.pb.finish_with_message(message);
    }

    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
