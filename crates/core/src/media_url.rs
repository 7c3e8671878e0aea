//! Media resource URLs with fragment-based seek hints
//!
//! A first playback attempt carries a `#t=<seconds>` media fragment so the
//! backend can start inside the clip; the retry shape is the same base URL
//! with the fragment stripped.

use crate::types::Clip;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A media URL split into its base and optional seek-hint fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MediaUrl {
    base: String,
    seek_hint: Option<u64>,
}

impl MediaUrl {
    /// Splits a raw URL into base and seek hint.
    ///
    /// Only a `t=<digits>` fragment is kept as a hint; any other fragment is
    /// discarded so retries never re-send it.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('#') {
            Some((base, fragment)) => Self {
                base: base.to_string(),
                seek_hint: fragment
                    .strip_prefix("t=")
                    .and_then(|secs| secs.parse().ok()),
            },
            None => Self {
                base: raw.to_string(),
                seek_hint: None,
            },
        }
    }

    /// First-attempt URL for a clip: base plus a hint at the clip start
    pub fn for_clip(base: &str, clip: &Clip) -> Self {
        let mut url = Self::parse(base);
        url.seek_hint = Some(clip.start() as u64);
        url
    }

    /// The retry shape: same base, no fragment
    pub fn without_seek_hint(&self) -> Self {
        Self {
            base: self.base.clone(),
            seek_hint: None,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn seek_hint(&self) -> Option<u64> {
        self.seek_hint
    }
}

impl From<String> for MediaUrl {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<MediaUrl> for String {
    fn from(url: MediaUrl) -> Self {
        url.to_string()
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seek_hint {
            Some(secs) => write!(f, "{}#t={}", self.base, secs),
            None => write!(f, "{}", self.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_url() {
        let url = MediaUrl::parse("https://host/media/lesson.mp4");
        assert_eq!(url.base(), "https://host/media/lesson.mp4");
        assert_eq!(url.seek_hint(), None);
    }

    #[test]
    fn test_parse_seek_fragment() {
        let url = MediaUrl::parse("https://host/media/lesson.mp4#t=30");
        assert_eq!(url.base(), "https://host/media/lesson.mp4");
        assert_eq!(url.seek_hint(), Some(30));
    }

    #[test]
    fn test_foreign_fragment_discarded() {
        let url = MediaUrl::parse("https://host/media/lesson.mp4#chapter-2");
        assert_eq!(url.seek_hint(), None);
        assert_eq!(url.to_string(), "https://host/media/lesson.mp4");
    }

    #[test]
    fn test_for_clip_hints_at_start() {
        let clip = Clip::from_stored(30.0, 90.0);
        let url = MediaUrl::for_clip("https://host/media/lesson.mp4", &clip);
        assert_eq!(url.to_string(), "https://host/media/lesson.mp4#t=30");
    }

    #[test]
    fn test_for_clip_replaces_existing_hint() {
        let clip = Clip::from_stored(5.0, 15.0);
        let url = MediaUrl::for_clip("https://host/lesson.mp4#t=99", &clip);
        assert_eq!(url.seek_hint(), Some(5));
    }

    #[test]
    fn test_without_seek_hint() {
        let clip = Clip::from_stored(30.0, 90.0);
        let url = MediaUrl::for_clip("https://host/lesson.mp4", &clip);
        let retry = url.without_seek_hint();
        assert_eq!(retry.to_string(), "https://host/lesson.mp4");
        assert_eq!(retry.base(), url.base());
    }

    #[test]
    fn test_serde_as_raw_string() {
        let url = MediaUrl::parse("https://host/lesson.mp4#t=12");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"https://host/lesson.mp4#t=12\"");

        let back: MediaUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }
}
