//! The marker storage contract

use crate::error::RepositoryResult;
use async_trait::async_trait;
use clipmark_core::{Marker, MarkerId, RecordingRef, TeacherId};

/// Remote marker storage.
///
/// Implemented over HTTP in this crate; test doubles implement it in
/// memory. All methods reject rather than panic, and none of them is
/// reachable from the playback path.
#[async_trait]
pub trait MarkerRepository: Send + Sync {
    /// Persists a new marker; the server assigns the id
    async fn create(&self, marker: &Marker) -> RepositoryResult<Marker>;

    /// Replaces a persisted marker's user-editable fields
    async fn update(&self, id: &MarkerId, marker: &Marker) -> RepositoryResult<Marker>;

    async fn delete(&self, id: &MarkerId) -> RepositoryResult<()>;

    /// All markers on one recording, for the playback dashboard
    async fn list_by_recording(&self, recording: &RecordingRef)
        -> RepositoryResult<Vec<Marker>>;

    /// All markers owned by one teacher
    async fn list_by_teacher(&self, teacher: &TeacherId) -> RepositoryResult<Vec<Marker>>;

    /// Public amazing moments across all owners, newest first
    async fn list_public_amazing_moments(&self, limit: usize) -> RepositoryResult<Vec<Marker>>;
}
