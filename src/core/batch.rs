//! Batch transcript processing for transcript-dl
//!
//! Walks the links in order, writes one section per recognized video to the
//! destination as soon as it is produced, and reports progress and log lines
//! through the caller's sinks. Per-link failures are logged and skipped; only
//! destination I/O failures abort the run.

use std::path::Path;

use log::{info, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::core::error::{Error, Result};
use crate::core::extract::extract_video_id;
use crate::core::fetcher::TranscriptFetcher;
use crate::core::options::{BatchOptions, OverwriteBehavior};

/// Outcome of a completed batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Where the transcripts were written
    pub destination: String,
    /// Number of links in the batch
    pub total: usize,
    /// Links whose transcript was written
    pub succeeded: usize,
    /// Links with no recognizable video ID
    pub unrecognized: usize,
    /// Links whose transcript could not be fetched (header only)
    pub failed: usize,
}

impl BatchSummary {
    fn new(destination: &str, total: usize) -> Self {
        Self {
            destination: destination.to_string(),
            total,
            succeeded: 0,
            unrecognized: 0,
            failed: 0,
        }
    }
}

/// Section header written before each video's captions
pub fn section_header(video_id: &str) -> String {
    format!("\n--- Transcript for Video ID: {video_id} ---\n\n")
}

/// Percentage of the batch done after `position` of `total` links
fn progress_percent(position: usize, total: usize) -> f64 {
    position as f64 / total as f64 * 100.0
}

/// Sequential batch runner over a fetch capability
pub struct BatchProcessor<F> {
    fetcher: F,
}

impl<F: TranscriptFetcher> BatchProcessor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run the batch into a file, replacing any previous content
    pub async fn process_to_file(
        &self,
        links: &[String],
        path: &Path,
        options: &BatchOptions,
    ) -> Result<BatchSummary> {
        if links.is_empty() {
            return Err(Error::NoLinksProvided);
        }

        let mut file = open_destination(path, &options.overwrite).await?;
        self.process(links, &mut file, &path.display().to_string(), options)
            .await
    }

    /// Run the batch into any writer
    ///
    /// `destination` names the writer in log lines and errors.
    pub async fn process<W: AsyncWrite + Unpin>(
        &self,
        links: &[String],
        writer: &mut W,
        destination: &str,
        options: &BatchOptions,
    ) -> Result<BatchSummary> {
        if links.is_empty() {
            return Err(Error::NoLinksProvided);
        }

        let total = links.len();
        let mut summary = BatchSummary::new(destination, total);

        options.emit_progress(0.0);

        for (index, link) in links.iter().enumerate() {
            let position = index + 1;

            match self.process_link(link, writer, destination, options).await {
                Ok(video_id) => {
                    summary.succeeded += 1;
                    options.emit_progress(progress_percent(position, total));

                    let line = format!("Added transcript for video ID: {video_id}");
                    info!("{line}");
                    options.emit_log(&line);
                }
                Err(e) if e.is_per_link() => {
                    match &e {
                        Error::UnrecognizedLinkFormat(_) => summary.unrecognized += 1,
                        _ => summary.failed += 1,
                    }

                    let line = format!("Error processing {link}: {e}");
                    warn!("{line}");
                    options.emit_log(&line);
                    options.emit_progress(progress_percent(position, total));
                }
                Err(e) => return Err(e),
            }
        }

        writer
            .flush()
            .await
            .map_err(|source| destination_error(destination, source))?;

        let line = format!("Transcripts saved to: {destination}");
        info!("{line}");
        options.emit_log(&line);

        Ok(summary)
    }

    /// Extract, write the header, fetch, write the captions
    ///
    /// The header goes out before the fetch, so a failed fetch leaves an empty section.
    async fn process_link<W: AsyncWrite + Unpin>(
        &self,
        link: &str,
        writer: &mut W,
        destination: &str,
        options: &BatchOptions,
    ) -> Result<String> {
        let video_id = extract_video_id(link)?;

        let line = format!("Processing video ID: {video_id}");
        info!("{line}");
        options.emit_log(&line);

        write_all(writer, section_header(&video_id).as_bytes(), destination).await?;

        let transcript = self.fetcher.fetch(&video_id).await?;

        for snippet in &transcript {
            writer
                .write_all(snippet.text.as_bytes())
                .await
                .map_err(|source| destination_error(destination, source))?;
            write_all(writer, b"\n", destination).await?;
        }

        writer
            .flush()
            .await
            .map_err(|source| destination_error(destination, source))?;

        Ok(video_id)
    }
}

async fn write_all<W: AsyncWrite + Unpin>(writer: &mut W, bytes: &[u8], destination: &str) -> Result<()> {
    writer
        .write_all(bytes)
        .await
        .map_err(|source| destination_error(destination, source))?;
    writer
        .flush()
        .await
        .map_err(|source| destination_error(destination, source))
}

fn destination_error(destination: &str, source: std::io::Error) -> Error {
    Error::DestinationWrite {
        path: destination.into(),
        source,
    }
}

/// Open the output file according to the overwrite behavior
async fn open_destination(path: &Path, behavior: &OverwriteBehavior) -> Result<tokio::fs::File> {
    let to_error = |source: std::io::Error| Error::DestinationWrite {
        path: path.to_path_buf(),
        source,
    };

    match behavior {
        OverwriteBehavior::Force => {
            if path.exists() {
                warn!("Overwriting existing file: {}", path.display());
            }
            tokio::fs::File::create(path).await.map_err(to_error)
        }
        OverwriteBehavior::NeverOverwrite => {
            if path.exists() {
                return Err(to_error(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "file already exists (drop --no-clobber to overwrite)",
                )));
            }
            tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .await
                .map_err(to_error)
        }
    }
}
