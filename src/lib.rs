//! # Transcript-dl Library
//!
//! Downloads caption transcripts for a batch of video links into a single
//! plain-text file.
//!
//! ## Features
//!
//! - **Link parsing**: watch, embed and short links, with or without scheme and `www.`
//! - **Sequential batch**: output order always matches input order
//! - **Log and continue**: a bad link or missing captions never aborts the batch
//! - **Progress tracking**: optional progress and log callbacks for custom UIs
//! - **Pluggable source**: anything implementing [`TranscriptFetcher`] can feed the batch
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let links = transcript_dl::parse_links(
//!         "https://www.youtube.com/watch?v=dQw4w9WgXcQ\nhttps://youtu.be/9bZkp7q19f0",
//!     );
//!
//!     // Writes ./youtube_transcripts.txt
//!     transcript_dl::download_transcripts(&links, ".", "youtube_transcripts").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Progress Tracking
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let links = vec!["https://youtu.be/dQw4w9WgXcQ".to_string()];
//!
//!     transcript_dl::download_with_progress(&links, "/tmp", "talks.txt", |percent| {
//!         println!("Progress: {:.1}%", percent);
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

// Re-export core types that users might need
pub use crate::core::batch::section_header;
pub use crate::core::error::{Error, FetchError, Result};
pub use crate::core::extract::extract_video_id;
pub use crate::core::fetcher::{Transcript, TranscriptFetcher, TranscriptSnippet};
pub use crate::core::options::{BatchOptions, LogCallback, OverwriteBehavior, ProgressCallback};
pub use crate::core::source::{parse_links, DEFAULT_FILENAME};

// Internal modules
mod core;

/// Download transcripts for `links` into `dir/filename`
///
/// A `.txt` extension is added to `filename` when missing. An existing file is
/// overwritten.
///
/// # Errors
/// * [`Error::NoLinksProvided`] when `links` is empty
/// * [`Error::NoDestination`] when `dir` is empty
/// * [`Error::DestinationWrite`] when the file cannot be opened or written
///
/// Per-link failures are not errors; they only show up in the log.
pub async fn download_transcripts(links: &[String], dir: &str, filename: &str) -> Result<BatchSummary> {
    download_with_options(links, dir, filename, BatchOptions::default()).await
}

/// Download transcripts with a progress callback receiving a percentage in [0, 100]
pub async fn download_with_progress<F>(
    links: &[String],
    dir: &str,
    filename: &str,
    progress: F,
) -> Result<BatchSummary>
where
    F: Fn(f64) + Send + Sync + 'static,
{
    let options = BatchOptions {
        progress: Some(Arc::new(progress)),
        ..Default::default()
    };

    download_with_options(links, dir, filename, options).await
}

/// Download transcripts with custom options
///
/// # Examples
/// ```rust,no_run
/// use transcript_dl::{BatchOptions, OverwriteBehavior};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = BatchOptions {
///     overwrite: OverwriteBehavior::NeverOverwrite,
///     log: Some(Arc::new(|line: &str| eprintln!("{line}"))),
///     ..Default::default()
/// };
///
/// let links = vec!["https://youtu.be/dQw4w9WgXcQ".to_string()];
/// transcript_dl::download_with_options(&links, ".", "out", options).await?;
/// # Ok(())
/// # }
/// ```
pub async fn download_with_options(
    links: &[String],
    dir: &str,
    filename: &str,
    options: BatchOptions,
) -> Result<BatchSummary> {
    if links.is_empty() {
        return Err(Error::NoLinksProvided);
    }
    let path = crate::core::resolve_output_path(dir, filename)?;

    let processor = BatchProcessor::new(YouTubeFetcher::new());
    processor.process_to_file(links, &path, &options).await
}

/// Advanced API: run a batch with a custom fetch capability or source configuration
///
/// # Examples
/// ```rust,no_run
/// use transcript_dl::{BatchOptions, BatchProcessor, FetchConfig, YouTubeFetcher};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FetchConfig {
///     languages: vec!["de".to_string(), "en".to_string()],
///     ..Default::default()
/// };
///
/// let processor = BatchProcessor::new(YouTubeFetcher::with_config(config));
/// let links = vec!["https://youtu.be/dQw4w9WgXcQ".to_string()];
/// processor
///     .process_to_file(&links, Path::new("out.txt"), &BatchOptions::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
pub use crate::core::{resolve_output_path, BatchProcessor, BatchSummary, FetchConfig, YouTubeFetcher};
