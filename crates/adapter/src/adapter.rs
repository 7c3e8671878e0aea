//! The normalized control surface

use crate::config::AdapterConfig;
use crate::detect::{ControlBinding, Detected, UpdateDelivery, VariantKind};
use crate::surface::{EventEmitter, EventListener, ListenerId, MediaElement, TimeListener};
use log::debug;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One consistent control contract over whichever variant detection chose.
///
/// All transport primitives come from the single bound variant; update
/// delivery is native registration where the backend has it and a polling
/// task where it does not.
pub struct PlayerAdapter {
    kind: VariantKind,
    binding: ControlBinding,
    delivery: UpdateDelivery,
    config: AdapterConfig,
}

impl std::fmt::Debug for PlayerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerAdapter")
            .field("kind", &self.kind)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PlayerAdapter {
    pub(crate) fn new(detected: Detected, config: AdapterConfig) -> Self {
        Self {
            kind: detected.kind,
            binding: detected.binding,
            delivery: detected.delivery,
            config,
        }
    }

    /// The variant detection committed to
    pub fn variant(&self) -> VariantKind {
        self.kind
    }

    pub fn current_time(&self) -> f64 {
        match &self.binding {
            ControlBinding::Element(element) => element.current_time(),
            ControlBinding::Transport(transport) => transport.get_current_time(),
        }
    }

    pub fn seek_to(&self, seconds: f64) {
        match &self.binding {
            ControlBinding::Element(element) => element.set_current_time(seconds),
            ControlBinding::Transport(transport) => transport.seek_to(seconds),
        }
    }

    pub fn play(&self) {
        match &self.binding {
            ControlBinding::Element(element) => element.play(),
            ControlBinding::Transport(transport) => transport.play(),
        }
    }

    pub fn pause(&self) {
        match &self.binding {
            ControlBinding::Element(element) => element.pause(),
            ControlBinding::Transport(transport) => transport.pause(),
        }
    }

    /// Points the backend at a (possibly reshaped) resource URL
    pub fn load(&self, url: &str) {
        match &self.binding {
            ControlBinding::Element(element) => element.load(url),
            ControlBinding::Transport(transport) => transport.load(url),
        }
    }

    /// Subscribes to position updates.
    ///
    /// Native registration is preferred; a backend with neither element
    /// events nor an emitter gets a polling task that synthesizes updates
    /// from `get_current_time()`. Dropping (or unsubscribing) the returned
    /// subscription stops delivery and cancels any polling task.
    pub fn subscribe_time_updates(&self, listener: TimeListener) -> Subscription {
        match &self.delivery {
            UpdateDelivery::Element(element) => {
                let id = element.add_time_listener(listener);
                Subscription::element(element.clone(), id)
            }
            UpdateDelivery::Emitter(emitter) => {
                let id = emitter.on_time(listener);
                Subscription::emitter(emitter.clone(), id)
            }
            UpdateDelivery::Polling(transport) => {
                let transport = transport.clone();
                let interval = self.config.poll_interval;
                debug!("no native update channel; polling every {:?}", interval);
                let task = tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(interval);
                    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                    // The first tick fires immediately and seeds the
                    // subscriber with the current position.
                    loop {
                        ticker.tick().await;
                        listener(transport.get_current_time());
                    }
                });
                Subscription::task(task)
            }
        }
    }

    /// Subscribes to transport events (errors and native end-of-media).
    ///
    /// A polling backend has no event channel at all; the subscription is
    /// inert in that case.
    pub fn subscribe_events(&self, listener: EventListener) -> Subscription {
        match &self.delivery {
            UpdateDelivery::Element(element) => {
                let id = element.add_event_listener(listener);
                Subscription::element(element.clone(), id)
            }
            UpdateDelivery::Emitter(emitter) => {
                let id = emitter.on_event(listener);
                Subscription::emitter(emitter.clone(), id)
            }
            UpdateDelivery::Polling(_) => {
                debug!("polling backend exposes no event channel");
                Subscription::detached()
            }
        }
    }
}

enum Detach {
    Element { element: Arc<dyn MediaElement>, id: ListenerId },
    Emitter { emitter: Arc<dyn EventEmitter>, id: ListenerId },
    Task(JoinHandle<()>),
    None,
}

/// A live listener registration; detaches on `unsubscribe()` or drop
pub struct Subscription {
    detach: Detach,
}

impl Subscription {
    fn element(element: Arc<dyn MediaElement>, id: ListenerId) -> Self {
        Self {
            detach: Detach::Element { element, id },
        }
    }

    fn emitter(emitter: Arc<dyn EventEmitter>, id: ListenerId) -> Self {
        Self {
            detach: Detach::Emitter { emitter, id },
        }
    }

    fn task(task: JoinHandle<()>) -> Self {
        Self {
            detach: Detach::Task(task),
        }
    }

    /// A subscription with nothing behind it
    pub fn detached() -> Self {
        Self { detach: Detach::None }
    }

    /// Stops delivery immediately
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        match std::mem::replace(&mut self.detach, Detach::None) {
            Detach::Element { element, id } => element.remove_listener(id),
            Detach::Emitter { emitter, id } => emitter.off(id),
            Detach::Task(task) => task.abort(),
            Detach::None => {}
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}
