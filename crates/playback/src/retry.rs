//! URL-fallback retry policy
//!
//! A playback failure on the first attempt usually means the backend choked
//! on the seek-hint fragment, so the one automatic retry reissues the same
//! base URL without it. Anything after that is reported to the caller and
//! left alone.

use clipmark_core::MediaUrl;

/// What to do about a playback failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAction {
    /// Reload with the reshaped URL and play again
    Reissue(MediaUrl),
    /// Budget spent; surface a terminal failure
    GiveUp,
}

/// Bounds automatic URL fallbacks for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryStrategy {
    max_fallbacks: u32,
}

impl RetryStrategy {
    pub fn new(max_fallbacks: u32) -> Self {
        Self { max_fallbacks }
    }

    pub fn max_fallbacks(&self) -> u32 {
        self.max_fallbacks
    }

    /// Decides the next step given how many fallbacks already ran
    pub fn decide(&self, attempt: u32, url: &MediaUrl) -> RetryAction {
        if attempt < self.max_fallbacks {
            RetryAction::Reissue(url.without_seek_hint())
        } else {
            RetryAction::GiveUp
        }
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(1)
    }
}
