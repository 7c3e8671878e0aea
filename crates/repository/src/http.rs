//! HTTP implementation of the marker storage contract

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::MarkerRepository;
use async_trait::async_trait;
use clipmark_core::{Marker, MarkerId, RecordingRef, TeacherId};
use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Base URL of the storage service, e.g. `https://api.host/v1`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl RepositoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Clipmark/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Marker storage over a REST backend
#[derive(Clone)]
pub struct HttpMarkerRepository {
    inner: reqwest::Client,
    config: RepositoryConfig,
}

impl HttpMarkerRepository {
    pub fn new(config: RepositoryConfig) -> RepositoryResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(RepositoryError::Http)?;
        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> RepositoryResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryError::Status {
                code: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MarkerRepository for HttpMarkerRepository {
    async fn create(&self, marker: &Marker) -> RepositoryResult<Marker> {
        debug!("creating marker on {}", marker.recording);
        let response = self
            .inner
            .post(self.endpoint("markers"))
            .json(marker)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &MarkerId, marker: &Marker) -> RepositoryResult<Marker> {
        debug!("updating marker {}", id);
        let response = self
            .inner
            .put(self.endpoint(&format!("markers/{}", id)))
            .json(marker)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &MarkerId) -> RepositoryResult<()> {
        debug!("deleting marker {}", id);
        let response = self
            .inner
            .delete(self.endpoint(&format!("markers/{}", id)))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryError::Status {
                code: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn list_by_recording(
        &self,
        recording: &RecordingRef,
    ) -> RepositoryResult<Vec<Marker>> {
        let response = self
            .inner
            .get(self.endpoint("markers"))
            .query(&[("recordingId", recording.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_by_teacher(&self, teacher: &TeacherId) -> RepositoryResult<Vec<Marker>> {
        let response = self
            .inner
            .get(self.endpoint("markers"))
            .query(&[("teacherId", teacher.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_public_amazing_moments(&self, limit: usize) -> RepositoryResult<Vec<Marker>> {
        let response = self
            .inner
            .get(self.endpoint("markers/public-amazing"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        Self::decode(response).await
    }
}
