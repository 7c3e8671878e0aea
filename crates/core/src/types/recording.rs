//! Tagged recording references
//!
//! The storage service addresses recordings with a bare string that is
//! sometimes a filename and sometimes a cloud object id. The shape heuristic
//! runs exactly once, here at the parse boundary; everything downstream
//! matches on the tag instead of re-sniffing the string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File extensions a locally served recording can carry
const MEDIA_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv", "m4a", "mp3", "wav"];

/// Digits in a `YYYYMMDDHHMMSS`-style capture timestamp
const TIMESTAMP_DIGITS: usize = 14;

/// Reference to a recording, tagged by how the backend serves it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordingRef {
    /// Filename-like token served from local storage
    LocalFile(String),
    /// Opaque cloud object identifier
    CloudObject(String),
}

impl RecordingRef {
    /// Classifies a raw recording token.
    ///
    /// A token carrying a known media-file extension or a timestamp-like
    /// digit run is a local file; anything else is a cloud object id.
    pub fn parse(raw: &str) -> Self {
        if has_media_extension(raw) || has_timestamp_run(raw) {
            Self::LocalFile(raw.to_string())
        } else {
            Self::CloudObject(raw.to_string())
        }
    }

    /// Returns the raw token as stored by the backend
    pub fn as_str(&self) -> &str {
        match self {
            Self::LocalFile(raw) | Self::CloudObject(raw) => raw,
        }
    }

    pub fn is_local_file(&self) -> bool {
        matches!(self, Self::LocalFile(_))
    }

    pub fn is_cloud_object(&self) -> bool {
        matches!(self, Self::CloudObject(_))
    }
}

fn has_media_extension(raw: &str) -> bool {
    match raw.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            MEDIA_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

fn has_timestamp_run(raw: &str) -> bool {
    let mut run = 0usize;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= TIMESTAMP_DIGITS {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

impl From<String> for RecordingRef {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<RecordingRef> for String {
    fn from(recording: RecordingRef) -> Self {
        recording.as_str().to_string()
    }
}

impl fmt::Display for RecordingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_means_local_file() {
        assert!(RecordingRef::parse("lesson.mp4").is_local_file());
        assert!(RecordingRef::parse("archive/grade7.WEBM").is_local_file());
    }

    #[test]
    fn test_timestamp_run_means_local_file() {
        assert!(RecordingRef::parse("capture_20230405123000").is_local_file());
    }

    #[test]
    fn test_short_digit_runs_stay_cloud() {
        assert!(RecordingRef::parse("obj-1234567890123").is_cloud_object());
    }

    #[test]
    fn test_opaque_token_means_cloud_object() {
        assert!(RecordingRef::parse("aXzK93j-fQ").is_cloud_object());
    }

    #[test]
    fn test_raw_token_survives() {
        let recording = RecordingRef::parse("lesson.mp4");
        assert_eq!(recording.as_str(), "lesson.mp4");
        assert_eq!(recording.to_string(), "lesson.mp4");
    }

    #[test]
    fn test_serde_uses_raw_string() {
        let recording = RecordingRef::parse("aXzK93j-fQ");
        let json = serde_json::to_string(&recording).unwrap();
        assert_eq!(json, "\"aXzK93j-fQ\"");

        let back: RecordingRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recording);
    }
}
