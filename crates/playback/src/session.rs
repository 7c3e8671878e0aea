//! Playback session state
//!
//! A session is ephemeral and UI-local: it exists from `load` to `close`
//! and is never persisted. All per-session flags and counters live here so
//! nothing leaks across sessions.

use clipmark_core::{Clip, Marker, MediaUrl};

/// Lifecycle of one clip-bounded viewing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session active
    Idle,
    /// Waiting for the player handle to become controllable
    AwaitingHandle,
    /// Adapter bound, playback not yet started
    Ready,
    /// A seek was issued; the new position is not yet confirmed
    Seeking,
    Playing,
    Paused,
    /// The media itself ran out (native end, not the clip boundary)
    Ended,
    Error,
}

/// Read-only view of a session for the caller's UI
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Absolute position in seconds, clamped to the clip
    pub elapsed: f64,
    /// Progress through the clip, always in `[0, 1]`
    pub progress: f64,
    /// Completed URL-fallback retries
    pub attempt: u32,
}

impl SessionSnapshot {
    pub(crate) fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            elapsed: 0.0,
            progress: 0.0,
            attempt: 0,
        }
    }
}

/// One live attempt to play a specific clip through a specific handle
#[derive(Debug)]
pub(crate) struct PlaybackSession {
    pub marker: Marker,
    pub clip: Clip,
    pub state: SessionState,
    pub elapsed: f64,
    pub attempt: u32,
    pub resource_url: MediaUrl,
    /// Guards the one automatic seek into the clip; spent when the entry
    /// seek is issued, including the reissue after a URL fallback
    pub corrective_seek_done: bool,
}

impl PlaybackSession {
    pub fn new(marker: Marker, base_url: &str) -> Self {
        // Stored bounds are untrusted here; the clip constructor repairs
        // them.
        let clip = marker.clip();
        let resource_url = MediaUrl::for_clip(base_url, &clip);
        Self {
            marker,
            clip,
            state: SessionState::AwaitingHandle,
            elapsed: clip.start(),
            attempt: 0,
            resource_url,
            corrective_seek_done: false,
        }
    }

    /// Progress derived only from the clip span, never from the media's
    /// absolute duration
    pub fn progress(&self) -> f64 {
        self.clip.fraction_of(self.elapsed)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            elapsed: self.elapsed,
            progress: self.progress(),
            attempt: self.attempt,
        }
    }
}
