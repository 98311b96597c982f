//! Input and source resolution for transcript-dl
//!
//! Handles the caption service location, the raw link block, and the output
//! file path.

use std::path::PathBuf;

use crate::core::error::{Error, Result};

/// Filename used when the caller does not choose one
pub const DEFAULT_FILENAME: &str = "youtube_transcripts.txt";

/// Configuration for the caption source
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Watch page endpoint; the video ID is passed as the `v` query parameter
    pub watch_base_url: String,

    /// Preferred caption languages, most preferred first
    pub languages: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            watch_base_url: "https://www.youtube.com/watch".to_string(),
            languages: vec!["en".to_string()],
        }
    }
}

impl FetchConfig {
    /// Watch page URL for a video
    pub fn watch_url(&self, video_id: &str) -> String {
        format!("{}?v={}", self.watch_base_url, video_id)
    }
}

/// Split a newline-separated block into links, trimming each and dropping blanks
pub fn parse_links(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the output file path from a directory and a filename
///
/// A `.txt` extension is appended unless the filename already ends with one
/// (case-insensitive).
pub fn resolve_output_path(dir: &str, filename: &str) -> Result<PathBuf> {
    let dir = dir.trim();
    if dir.is_empty() {
        return Err(Error::NoDestination);
    }

    let filename = filename.trim();
    if filename.is_empty() {
        return Err(Error::InvalidInput("Please enter a filename".to_string()));
    }

    let filename = if filename.to_lowercase().ends_with(".txt") {
        filename.to_string()
    } else {
        format!("{filename}.txt")
    };

    Ok(PathBuf::from(dir).join(filename))
}
