//! Marker authoring
//!
//! The form model behind creating and editing markers: validation while the
//! user edits (reject, never repair), silent visibility normalization, and
//! the submit path that refuses to touch storage with invalid input.

mod draft;
mod error;

pub use draft::MarkerDraft;
pub use error::{AuthoringError, AuthoringResult};
