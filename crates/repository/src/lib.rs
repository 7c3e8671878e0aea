//! Marker storage access
//!
//! The `MarkerRepository` contract plus its HTTP implementation. Playback
//! never touches this crate; it serves the authoring form and the dashboard
//! lists.

mod error;
mod http;
mod stream;
mod traits;

pub use error::{RepositoryError, RepositoryResult};
pub use http::{HttpMarkerRepository, RepositoryConfig};
pub use stream::stream_url;
pub use traits::MarkerRepository;
