//! Video identifier extraction
//!
//! Maps the link shapes users paste (watch pages, embeds, short links) to the
//! bare video ID the caption service understands.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{Error, Result};

/// Recognized link shapes, checked in order; the first match wins
static LINK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&\s]+)",
        r"(?:https?://)?(?:www\.)?youtube\.com/embed/([^&\s]+)",
        r"(?:https?://)?(?:www\.)?youtu\.be/([^&\s]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid link pattern"))
    .collect()
});

/// Extract the video ID from a link
///
/// The scheme and `www.` prefix are optional. The ID ends at the first `&` or
/// whitespace and is otherwise returned as-is, without character or length checks.
///
/// # Examples
/// ```
/// use transcript_dl::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
/// assert!(extract_video_id("not a link").is_err());
/// ```
pub fn extract_video_id(link: &str) -> Result<String> {
    let link = link.trim();

    LINK_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(link))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| Error::UnrecognizedLinkFormat(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_links() {
        for link in [
            "https://www.youtube.com/watch?v=AAA",
            "http://youtube.com/watch?v=AAA",
            "www.youtube.com/watch?v=AAA",
            "youtube.com/watch?v=AAA",
        ] {
            assert_eq!(extract_video_id(link).unwrap(), "AAA", "link: {link}");
        }
    }

    #[test]
    fn test_embed_links() {
        assert_eq!(extract_video_id("https://www.youtube.com/embed/xyz_123").unwrap(), "xyz_123");
        assert_eq!(extract_video_id("youtube.com/embed/xyz_123").unwrap(), "xyz_123");
    }

    #[test]
    fn test_short_links() {
        assert_eq!(extract_video_id("https://youtu.be/BBB").unwrap(), "BBB");
        assert_eq!(extract_video_id("youtu.be/BBB").unwrap(), "BBB");
    }

    #[test]
    fn test_id_stops_at_ampersand() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=AAA&t=42s&list=PL1").unwrap(),
            "AAA"
        );
        assert_eq!(extract_video_id("https://www.youtube.com/embed/CCC&autoplay=1").unwrap(), "CCC");
    }

    #[test]
    fn test_id_stops_at_whitespace() {
        assert_eq!(extract_video_id("https://youtu.be/BBB trailing words").unwrap(), "BBB");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(extract_video_id("   https://youtu.be/BBB \t\n").unwrap(), "BBB");
    }

    #[test]
    fn test_no_identifier_validation() {
        // Short-link query strings are kept, only '&' and whitespace terminate
        assert_eq!(extract_video_id("https://youtu.be/BBB?si=share").unwrap(), "BBB?si=share");
        assert_eq!(extract_video_id("https://youtu.be/x").unwrap(), "x");
    }

    #[test]
    fn test_watch_checked_before_short_link() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=AAA youtu.be/BBB").unwrap(),
            "AAA"
        );
    }

    #[test]
    fn test_unrecognized_links() {
        for link in ["not a link", "", "https://vimeo.com/12345", "https://www.youtube.com/channel/UC1"] {
            match extract_video_id(link) {
                Err(Error::UnrecognizedLinkFormat(l)) => assert_eq!(l, link.trim()),
                other => panic!("Expected UnrecognizedLinkFormat for {link:?}, got {other:?}"),
            }
        }
    }
}
