//! Stream URL construction
//!
//! Locally stored recordings and cloud objects are served under different
//! paths; the tagged reference decides which, so no caller re-inspects the
//! raw token. The playback layer wraps the result in a seek-hinted
//! `MediaUrl`.

use clipmark_core::RecordingRef;

/// Builds the delivery URL for a recording
pub fn stream_url(base: &str, recording: &RecordingRef) -> String {
    let base = base.trim_end_matches('/');
    match recording {
        RecordingRef::LocalFile(name) => format!("{}/media/{}", base, name),
        RecordingRef::CloudObject(id) => format!("{}/streams/{}", base, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipmark_core::{Clip, MediaUrl};

    #[test]
    fn test_local_file_served_from_media_path() {
        let recording = RecordingRef::parse("20230405123000_grade7.mp4");
        assert_eq!(
            stream_url("https://host/", &recording),
            "https://host/media/20230405123000_grade7.mp4"
        );
    }

    #[test]
    fn test_cloud_object_served_from_streams_path() {
        let recording = RecordingRef::parse("aXzK93j-fQ");
        assert_eq!(
            stream_url("https://host", &recording),
            "https://host/streams/aXzK93j-fQ"
        );
    }

    #[test]
    fn test_stream_url_composes_with_seek_hint() {
        let recording = RecordingRef::parse("lesson.mp4");
        let clip = Clip::from_stored(30.0, 90.0);
        let url = MediaUrl::for_clip(&stream_url("https://host", &recording), &clip);
        assert_eq!(url.to_string(), "https://host/media/lesson.mp4#t=30");
    }
}
