//! Player adapter - one control contract over heterogeneous player handles
//!
//! The host mounts a media widget asynchronously and hands over an opaque
//! handle whose control surface varies by backend: element semantics, a
//! method wrapper, a wrapper nested one level down, or an emitter-style
//! event pair. This crate probes the handle until it becomes controllable,
//! commits to exactly one variant, and exposes a single normalized surface
//! to the playback layer.

mod adapter;
mod config;
mod detect;
mod error;
mod probe;
mod surface;
pub mod testing;

pub use adapter::{PlayerAdapter, Subscription};
pub use config::AdapterConfig;
pub use detect::{detect, Detected, VariantKind};
pub use error::{AdapterError, AdapterResult};
pub use probe::{bind, ProbePolicy};
pub use surface::{
    EventEmitter, EventListener, HandleSource, ListenerId, MediaElement, PlayerHandle,
    TimeListener, Transport, TransportEvent,
};
