//! Domain types for Clipmark
//!
//! - `marker`: persisted marker annotations
//! - `clip`: the playback sub-interval and its arithmetic
//! - `recording`: tagged recording references
//! - `ids`: opaque identifier newtypes
//! - `common`: timestamps and the validation trait

mod clip;
mod common;
mod ids;
mod marker;
mod recording;

pub use clip::Clip;
pub use common::{Timestamp, Validate};
pub use ids::{MarkerId, TeacherId};
pub use marker::{Marker, MarkerType};
pub use recording::RecordingRef;
