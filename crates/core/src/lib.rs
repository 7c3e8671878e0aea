//! Domain types and pure utilities for Clipmark
//!
//! Everything here is side-effect free: marker and recording models, the
//! clip arithmetic used by the boundary controller, media URL shaping, and
//! the display time codec.

pub mod media_url;
pub mod timecode;
pub mod types;

// Re-export commonly used types
pub use media_url::MediaUrl;
pub use types::{
    Clip, Marker, MarkerId, MarkerType, RecordingRef, TeacherId, Timestamp, Validate,
};
