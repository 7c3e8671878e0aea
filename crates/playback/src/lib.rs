//! Bounded-clip playback
//!
//! The boundary controller drives an adapted player handle so that exactly
//! one marker's clip plays: it seeks into the clip once, clamps every
//! reported position to the clip span, auto-pauses at the clip end, and
//! retries a failed load once with a reshaped resource URL.

mod controller;
mod error;
mod retry;
mod session;

pub use controller::{BoundaryController, NoticeHandler, SessionNotice};
pub use error::{SessionError, SessionResult};
pub use retry::{RetryAction, RetryStrategy};
pub use session::{SessionSnapshot, SessionState};
