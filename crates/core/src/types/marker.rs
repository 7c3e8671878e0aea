//! Marker domain model

use crate::types::{Clip, MarkerId, RecordingRef, TeacherId, Timestamp, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of annotation a marker carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    /// A highlight worth sharing; may be made public by its owner
    Amazing,
    /// A problem report; always private to the recording's owner
    Incident,
}

impl MarkerType {
    /// Incident markers can never be shared
    pub fn is_always_private(&self) -> bool {
        matches!(self, Self::Incident)
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amazing => write!(f, "amazing"),
            Self::Incident => write!(f, "incident"),
        }
    }
}

/// A user-authored, time-bounded annotation of one recording
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Assigned by the storage service on creation; immutable thereafter
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<MarkerId>,
    #[serde(rename = "recordingId")]
    pub recording: RecordingRef,
    #[serde(rename = "teacherId")]
    pub teacher: TeacherId,
    pub marker_type: MarkerType,
    /// Clip start in whole seconds
    pub start_time: u64,
    /// Clip end in whole seconds; `end_time > start_time`
    pub end_time: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub is_public: bool,
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,
}

impl Marker {
    pub fn new(
        recording: RecordingRef,
        teacher: TeacherId,
        marker_type: MarkerType,
        start_time: u64,
        end_time: u64,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            recording,
            teacher,
            marker_type,
            start_time,
            end_time,
            title: title.into(),
            description: None,
            is_public: false,
            created_at: Timestamp::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets visibility; an incident marker stays private no matter what
    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public && !self.marker_type.is_always_private();
        self
    }

    /// True when other owners' dashboards may read this marker
    pub fn visible_to_others(&self) -> bool {
        self.is_public && self.marker_type == MarkerType::Amazing
    }

    /// The playback interval for this marker.
    ///
    /// Stored bounds are treated as untrusted and repaired defensively; see
    /// [`Clip::from_stored`].
    pub fn clip(&self) -> Clip {
        Clip::from_stored(self.start_time as f64, self.end_time as f64)
    }
}

impl Validate for Marker {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("marker title must not be empty".to_string());
        }

        if self.end_time <= self.start_time {
            problems.push("marker end time must be after its start time".to_string());
        }

        if self.marker_type.is_always_private() && self.is_public {
            problems.push("incident markers are always private".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> Marker {
        Marker::new(
            RecordingRef::parse("lesson.mp4"),
            TeacherId::new("jane.doe@school.example"),
            MarkerType::Amazing,
            30,
            90,
            "Great question handling",
        )
    }

    #[test]
    fn test_new_marker_defaults() {
        let m = marker();
        assert!(m.id.is_none());
        assert!(!m.is_public);
        assert!(m.description.is_none());
        assert!(m.is_valid());
    }

    #[test]
    fn test_visibility_for_amazing() {
        let m = marker().with_visibility(true);
        assert!(m.is_public);
        assert!(m.visible_to_others());
    }

    #[test]
    fn test_incident_never_public() {
        let mut m = marker();
        m.marker_type = MarkerType::Incident;
        let m = m.with_visibility(true);
        assert!(!m.is_public);
        assert!(!m.visible_to_others());
    }

    #[test]
    fn test_validation_rejects_empty_title() {
        let mut m = marker();
        m.title = "   ".to_string();
        assert!(!m.is_valid());
    }

    #[test]
    fn test_validation_rejects_inverted_bounds() {
        let mut m = marker();
        m.end_time = m.start_time;
        assert!(!m.is_valid());
    }

    #[test]
    fn test_validation_rejects_public_incident() {
        let mut m = marker();
        m.marker_type = MarkerType::Incident;
        m.is_public = true;
        assert!(!m.is_valid());
    }

    #[test]
    fn test_clip_uses_stored_bounds() {
        let clip = marker().clip();
        assert_eq!(clip.start(), 30.0);
        assert_eq!(clip.end(), 90.0);
    }

    #[test]
    fn test_clip_repairs_bad_stored_bounds() {
        let mut m = marker();
        m.end_time = m.start_time;
        let clip = m.clip();
        assert_eq!(clip.start(), 30.0);
        assert_eq!(clip.end(), 40.0);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let m = marker().with_description("Socratic follow-up");
        let json = serde_json::to_value(&m).unwrap();

        assert_eq!(json["recordingId"], "lesson.mp4");
        assert_eq!(json["teacherId"], "jane.doe@school.example");
        assert_eq!(json["markerType"], "amazing");
        assert_eq!(json["startTime"], 30);
        assert_eq!(json["endTime"], 90);
        assert_eq!(json["isPublic"], false);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_wire_round_trip() {
        let json = r#"{
            "id": "m-7",
            "recordingId": "aXzK93j-fQ",
            "teacherId": "t@school.example",
            "markerType": "incident",
            "startTime": 12,
            "endTime": 40,
            "title": "Disruption",
            "isPublic": false
        }"#;

        let m: Marker = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, Some(MarkerId::new("m-7")));
        assert!(m.recording.is_cloud_object());
        assert_eq!(m.marker_type, MarkerType::Incident);
        assert!(m.is_valid());
    }
}
