//! Error types for transcript-dl
//!
//! Splits failures into two tiers: per-link errors, which the batch logs and
//! skips, and batch-level errors, which abort the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a fetch capability for a single video
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The watch page carried no player data at all
    #[error("video is unavailable")]
    VideoUnavailable,

    /// The video exists but has no caption tracks
    #[error("subtitles are disabled for this video")]
    TranscriptsDisabled,

    /// Caption tracks exist, none in the requested languages
    #[error("no transcript found for languages [{}] (available: [{}])", .languages.join(", "), .available.join(", "))]
    NoTranscriptFound {
        languages: Vec<String>,
        available: Vec<String>,
    },

    /// Remote answered with a non-success status or an unusable response
    #[error("HTTP error: {0}")]
    Http(String),

    /// Connection or timeout problem
    #[error("network error: {0}")]
    Network(String),

    /// The caption payload could not be decoded
    #[error("failed to parse caption data: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            FetchError::Network(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Main error type for transcript-dl operations
#[derive(Debug, Error)]
pub enum Error {
    /// Link matched none of the recognized URL shapes
    #[error("Could not extract video ID from {0}")]
    UnrecognizedLinkFormat(String),

    /// Captions could not be retrieved for one video
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Empty link list
    #[error("Please enter YouTube video links")]
    NoLinksProvided,

    /// No output location was given
    #[error("Please select a save location")]
    NoDestination,

    /// The output file could not be opened or written
    #[error("Failed to save transcripts to {}: {source}", .path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the batch can log this error and move on to the next link
    pub fn is_per_link(&self) -> bool {
        matches!(self, Error::UnrecognizedLinkFormat(_) | Error::Fetch(_))
    }
}

/// Convenience result type for transcript-dl operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_link_message() {
        let err = Error::UnrecognizedLinkFormat("not a link".to_string());
        assert_eq!(err.to_string(), "Could not extract video ID from not a link");
        assert!(err.is_per_link());
    }

    #[test]
    fn test_fetch_error_is_transparent() {
        let err: Error = FetchError::TranscriptsDisabled.into();
        assert_eq!(err.to_string(), "subtitles are disabled for this video");
        assert!(err.is_per_link());
    }

    #[test]
    fn test_no_transcript_found_lists_languages() {
        let err = FetchError::NoTranscriptFound {
            languages: vec!["en".to_string(), "de".to_string()],
            available: vec!["fr".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("[en, de]"));
        assert!(msg.contains("available: [fr]"));
    }

    #[test]
    fn test_batch_level_errors() {
        assert!(!Error::NoLinksProvided.is_per_link());
        assert!(!Error::NoDestination.is_per_link());

        let err = Error::DestinationWrite {
            path: PathBuf::from("/nope/out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_per_link());
        assert!(err.to_string().starts_with("Failed to save transcripts to /nope/out.txt"));
    }
}
