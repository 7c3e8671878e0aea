//! The marker form model

use crate::error::{AuthoringError, AuthoringResult};
use clipmark_core::{Marker, MarkerId, MarkerType, RecordingRef, TeacherId, Validate};
use clipmark_repository::MarkerRepository;
use log::debug;

/// User-editable marker fields, as the form holds them.
///
/// While the user edits, invalid bounds are rejected outright; the
/// defensive repair of stored data belongs to the playback side and never
/// runs here.
#[derive(Debug, Clone)]
pub struct MarkerDraft {
    pub recording: RecordingRef,
    pub teacher: TeacherId,
    pub marker_type: MarkerType,
    pub start_time: u64,
    pub end_time: u64,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
}

impl MarkerDraft {
    pub fn new(recording: RecordingRef, teacher: TeacherId, marker_type: MarkerType) -> Self {
        Self {
            recording,
            teacher,
            marker_type,
            start_time: 0,
            end_time: 0,
            title: String::new(),
            description: None,
            is_public: false,
        }
    }

    pub fn with_bounds(mut self, start_time: u64, end_time: u64) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Applies the visibility invariant: an incident draft is silently made
    /// private, whatever the form checkbox said.
    pub fn normalized(mut self) -> Self {
        if self.marker_type.is_always_private() {
            self.is_public = false;
        }
        self
    }

    /// Builds the persistable marker. Call after `validate`; normalization
    /// is applied here regardless.
    pub fn into_marker(self) -> Marker {
        let draft = self.normalized();
        let mut marker = Marker::new(
            draft.recording,
            draft.teacher,
            draft.marker_type,
            draft.start_time,
            draft.end_time,
            draft.title,
        )
        .with_visibility(draft.is_public);
        marker.description = draft.description;
        marker
    }

    /// Validates, normalizes, and persists a new marker.
    ///
    /// An invalid draft is rejected before the repository is contacted.
    pub async fn submit(&self, repository: &dyn MarkerRepository) -> AuthoringResult<Marker> {
        self.validate()
            .map_err(|problems| AuthoringError::Validation { problems })?;
        debug!("submitting marker draft for {}", self.recording);
        let marker = self.clone().into_marker();
        Ok(repository.create(&marker).await?)
    }

    /// Validates, normalizes, and persists edits to an existing marker.
    pub async fn submit_update(
        &self,
        id: &MarkerId,
        repository: &dyn MarkerRepository,
    ) -> AuthoringResult<Marker> {
        self.validate()
            .map_err(|problems| AuthoringError::Validation { problems })?;
        debug!("updating marker {}", id);
        let mut marker = self.clone().into_marker();
        marker.id = Some(id.clone());
        Ok(repository.update(id, &marker).await?)
    }
}

impl Validate for MarkerDraft {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("a title is required".to_string());
        }

        if self.end_time <= self.start_time {
            problems.push("the end time must be after the start time".to_string());
        }

        if self.teacher.as_str().trim().is_empty() {
            problems.push("the recording's owner is missing".to_string());
        }

        if self.recording.as_str().trim().is_empty() {
            problems.push("the recording reference is missing".to_string());
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
    use async_trait::async_trait;
    use clipmark_repository::{RepositoryError, RepositoryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn draft() -> MarkerDraft {
        MarkerDraft::new(
            RecordingRef::parse("lesson.mp4"),
            TeacherId::new("jane.doe@school.example"),
            MarkerType::Amazing,
        )
        .with_bounds(30, 90)
        .with_title("Great question handling")
    }

    /// In-memory repository recording every call
    #[derive(Default)]
    struct CapturingRepo {
        created: Mutex<Vec<Marker>>,
        updated: Mutex<Vec<Marker>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MarkerRepository for CapturingRepo {
        async fn create(&self, marker: &Marker) -> RepositoryResult<Marker> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut stored = marker.clone();
            stored.id = Some(MarkerId::new("m-1"));
            self.created.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn update(&self, id: &MarkerId, marker: &Marker) -> RepositoryResult<Marker> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut stored = marker.clone();
            stored.id = Some(id.clone());
            self.updated.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn delete(&self, _id: &MarkerId) -> RepositoryResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn list_by_recording(
            &self,
            _recording: &RecordingRef,
        ) -> RepositoryResult<Vec<Marker>> {
            Ok(Vec::new())
        }

        async fn list_by_teacher(&self, _teacher: &TeacherId) -> RepositoryResult<Vec<Marker>> {
            Ok(Vec::new())
        }

        async fn list_public_amazing_moments(
            &self,
            _limit: usize,
        ) -> RepositoryResult<Vec<Marker>> {
            Ok(Vec::new())
        }
    }

    /// Repository that always rejects
    struct FailingRepo;

    #[async_trait]
    impl MarkerRepository for FailingRepo {
        async fn create(&self, _marker: &Marker) -> RepositoryResult<Marker> {
            Err(RepositoryError::Status { code: 500 })
        }

        async fn update(&self, _id: &MarkerId, _marker: &Marker) -> RepositoryResult<Marker> {
            Err(RepositoryError::Status { code: 500 })
        }

        async fn delete(&self, _id: &MarkerId) -> RepositoryResult<()> {
            Err(RepositoryError::Status { code: 500 })
        }

        async fn list_by_recording(
            &self,
            _recording: &RecordingRef,
        ) -> RepositoryResult<Vec<Marker>> {
            Err(RepositoryError::Status { code: 500 })
        }

        async fn list_by_teacher(&self, _teacher: &TeacherId) -> RepositoryResult<Vec<Marker>> {
            Err(RepositoryError::Status { code: 500 })
        }

        async fn list_public_amazing_moments(
            &self,
            _limit: usize,
        ) -> RepositoryResult<Vec<Marker>> {
            Err(RepositoryError::Status { code: 500 })
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().is_valid());
    }

    #[test]
    fn test_empty_title_rejected() {
        let d = draft().with_title("   ");
        let problems = d.validate().unwrap_err();
        assert!(problems.iter().any(|p| p.contains("title")));
    }

    #[test]
    fn test_inverted_bounds_rejected_not_repaired() {
        let d = draft().with_bounds(90, 90);
        assert!(!d.is_valid());
        // The draft keeps what the user typed; nothing is clamped.
        assert_eq!(d.end_time, 90);
    }

    #[test]
    fn test_incident_visibility_normalized_silently() {
        let d = MarkerDraft::new(
            RecordingRef::parse("lesson.mp4"),
            TeacherId::new("t@school.example"),
            MarkerType::Incident,
        )
        .with_bounds(5, 25)
        .with_title("Disruption")
        .with_visibility(true);

        // Normalization is not a validation failure.
        assert!(d.is_valid());
        let marker = d.into_marker();
        assert!(!marker.is_public);
    }

    #[test]
    fn test_amazing_visibility_preserved() {
        let marker = draft().with_visibility(true).into_marker();
        assert!(marker.is_public);
        assert!(marker.visible_to_others());
    }

    #[tokio::test]
    async fn test_submit_persists_and_returns_id() {
        let repo = CapturingRepo::default();
        let marker = draft().submit(&repo).await.unwrap();
        assert_eq!(marker.id, Some(MarkerId::new("m-1")));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_repository() {
        let repo = CapturingRepo::default();
        let result = draft().with_bounds(20, 10).submit(&repo).await;

        assert!(matches!(result, Err(AuthoringError::Validation { .. })));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_incident_persisted_private() {
        let repo = CapturingRepo::default();
        let d = MarkerDraft::new(
            RecordingRef::parse("lesson.mp4"),
            TeacherId::new("t@school.example"),
            MarkerType::Incident,
        )
        .with_bounds(5, 25)
        .with_title("Disruption")
        .with_visibility(true);

        d.submit(&repo).await.unwrap();
        let created = repo.created.lock().unwrap();
        assert!(!created[0].is_public);
    }

    #[tokio::test]
    async fn test_submit_update_keeps_id() {
        let repo = CapturingRepo::default();
        let id = MarkerId::new("m-9");
        let marker = draft().submit_update(&id, &repo).await.unwrap();
        assert_eq!(marker.id, Some(id));
        assert_eq!(repo.updated.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repository_rejection_propagates() {
        let result = draft().submit(&FailingRepo).await;
        assert!(matches!(
            result,
            Err(AuthoringError::Repository(RepositoryError::Status { code: 500 }))
        ));
    }
}
