//! Caption retrieval for transcript-dl
//!
//! Defines the fetch capability the batch depends on and the HTTP
//! implementation that reads caption tracks from the video watch page.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};

use crate::core::error::FetchError;
use crate::core::source::FetchConfig;

/// Global HTTP client shared by all fetchers
static GLOBAL_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .tcp_keepalive(Duration::from_secs(60))
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("transcript-dl/{}", env!("TRANSCRIPT_DL_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// One caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSnippet {
    /// Caption text, verbatim
    pub text: String,
    /// Start offset in seconds
    pub start: f64,
    /// Display duration in seconds
    pub duration: f64,
}

impl TranscriptSnippet {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Ordered caption lines for one video
pub type Transcript = Vec<TranscriptSnippet>;

/// Capability that turns a video ID into its transcript
///
/// Every failure is reported as a [`FetchError`]; the batch treats all of them
/// the same way (log and skip).
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<Transcript, FetchError>;
}

#[async_trait]
impl<T: TranscriptFetcher + ?Sized> TranscriptFetcher for std::sync::Arc<T> {
    async fn fetch(&self, video_id: &str) -> Result<Transcript, FetchError> {
        (**self).fetch(video_id).await
    }
}

/// Caption track entry from the player response embedded in the watch page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
}

/// `fmt=json3` timed-text payload
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Option<Vec<TimedTextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Fetches captions over HTTP from the video site
pub struct YouTubeFetcher {
    config: FetchConfig,
}

impl Default for YouTubeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
        }
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = GLOBAL_CLIENT
            .get(url)
            .header("Accept-Language", "en-US,en")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(format!("{status} from {url}")));
        }

        Ok(response.text().await?)
    }

    /// Pick a track following the language preference, manual tracks before generated ones
    fn select_track<'a>(&self, tracks: &'a [CaptionTrack]) -> Result<&'a CaptionTrack, FetchError> {
        for language in &self.config.languages {
            let mut candidates = tracks.iter().filter(|t| &t.language_code == language);
            let manual = candidates.clone().find(|t| !t.is_generated());
            if let Some(track) = manual.or_else(|| candidates.next()) {
                debug!(
                    "Selected {} caption track '{}'",
                    if track.is_generated() { "generated" } else { "manual" },
                    track.language_code
                );
                return Ok(track);
            }
        }

        let mut available: Vec<String> = tracks.iter().map(|t| t.language_code.clone()).collect();
        available.dedup();
        Err(FetchError::NoTranscriptFound {
            languages: self.config.languages.clone(),
            available,
        })
    }
}

#[async_trait]
impl TranscriptFetcher for YouTubeFetcher {
    async fn fetch(&self, video_id: &str) -> Result<Transcript, FetchError> {
        let page = self.get_text(&self.config.watch_url(video_id)).await?;
        let tracks = parse_caption_tracks(&page)?;
        let track = self.select_track(&tracks)?;

        let body = self.get_text(&json3_url(&track.base_url)).await?;
        parse_timed_text(&body)
    }
}

/// Deserialize the JSON value that directly follows `key` in `haystack`
fn json_after_key<T: serde::de::DeserializeOwned>(haystack: &str, key: &str) -> Option<Result<T, FetchError>> {
    let start = haystack.find(key)? + key.len();
    let mut values = serde_json::Deserializer::from_str(&haystack[start..]).into_iter::<T>();
    values.next().map(|value| value.map_err(FetchError::from))
}

/// Caption tracks from a watch page
fn parse_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>, FetchError> {
    let playability: PlayabilityStatus = match json_after_key(page, "\"playabilityStatus\":") {
        Some(status) => status?,
        None => return Err(FetchError::VideoUnavailable),
    };
    if playability.status != "OK" {
        debug!("Playability status: {}", playability.status);
        return Err(FetchError::VideoUnavailable);
    }

    match json_after_key::<Vec<CaptionTrack>>(page, "\"captionTracks\":") {
        Some(tracks) => {
            let tracks = tracks?;
            if tracks.is_empty() {
                Err(FetchError::TranscriptsDisabled)
            } else {
                Ok(tracks)
            }
        }
        None => Err(FetchError::TranscriptsDisabled),
    }
}

/// Request the JSON flavour of a timed-text track
fn json3_url(base_url: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}fmt=json3")
}

/// Caption lines from a `fmt=json3` payload
fn parse_timed_text(body: &str) -> Result<Transcript, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::Parse("empty caption response".to_string()));
    }

    let timed_text: TimedText = serde_json::from_str(body)?;

    Ok(timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|seg| seg.utf8).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(TranscriptSnippet::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect())
}
