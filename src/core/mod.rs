//! Core library modules for transcript-dl
//!
//! This module contains the internal implementation details of the transcript-dl library.

pub mod error;
pub mod extract;
pub mod source;
pub mod options;
pub mod fetcher;
pub mod batch;

// Re-export main types for internal use
pub use batch::{BatchProcessor, BatchSummary};
pub use fetcher::YouTubeFetcher;
pub use source::{FetchConfig, resolve_output_path};
