//! CLI-specific utilities for transcript-dl
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod progress;

pub use progress::{channel_options, BatchEvent, ProgressManager};
