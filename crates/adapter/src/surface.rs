//! Capability surfaces a player handle may expose
//!
//! A closed set of control shapes replaces open-ended shape probing: each
//! backend maps onto exactly one of these traits, and detection commits to
//! one of them for the life of the adapter.

use std::fmt;
use std::sync::Arc;

/// Key for removing a registered listener
pub type ListenerId = u64;

/// Callback receiving playback positions in seconds
pub type TimeListener = Arc<dyn Fn(f64) + Send + Sync>;

/// Callback receiving transport events
pub type EventListener = Arc<dyn Fn(TransportEvent) + Send + Sync>;

/// Events a backend reports besides position updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The media itself finished, independent of any clip boundary
    Ended,
    /// The backend failed to play the current resource
    Error(String),
}

impl fmt::Display for TransportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ended => write!(f, "ended"),
            Self::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Element semantics: a current-time property and element-style listener
/// registration.
pub trait MediaElement: Send + Sync {
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn play(&self);
    fn pause(&self);
    fn load(&self, url: &str);
    fn add_time_listener(&self, listener: TimeListener) -> ListenerId;
    fn add_event_listener(&self, listener: EventListener) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);
}

/// Wrapper semantics: explicit transport methods, no event registration.
pub trait Transport: Send + Sync {
    fn get_current_time(&self) -> f64;
    fn seek_to(&self, seconds: f64);
    fn play(&self);
    fn pause(&self);
    fn load(&self, url: &str);
}

/// Emitter-style subscription pair a wrapper may expose instead of element
/// events.
pub trait EventEmitter: Send + Sync {
    fn on_time(&self, listener: TimeListener) -> ListenerId;
    fn on_event(&self, listener: EventListener) -> ListenerId;
    fn off(&self, id: ListenerId);
}

/// The opaque handle the host hands over.
///
/// Capabilities are probed, never declared up front; every accessor defaults
/// to absent. The host owns the handle - this crate only observes and
/// drives it.
pub trait PlayerHandle: Send + Sync {
    fn as_element(&self) -> Option<Arc<dyn MediaElement>> {
        None
    }

    fn as_transport(&self) -> Option<Arc<dyn Transport>> {
        None
    }

    fn as_emitter(&self) -> Option<Arc<dyn EventEmitter>> {
        None
    }

    /// Accessor for a player wrapped one level down
    fn inner_player(&self) -> Option<Arc<dyn PlayerHandle>> {
        None
    }
}

/// Where the handle comes from; `None` until the host widget has mounted.
pub trait HandleSource: Send + Sync {
    fn handle(&self) -> Option<Arc<dyn PlayerHandle>>;
}
