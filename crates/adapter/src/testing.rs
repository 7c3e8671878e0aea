//! Test doubles for the capability surfaces
//!
//! Shared by this crate's unit tests and by downstream crates exercising the
//! playback layer against scripted backends. Not intended for production
//! use.

use crate::surface::{
    EventEmitter, EventListener, HandleSource, ListenerId, MediaElement, PlayerHandle,
    TimeListener, Transport, TransportEvent,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A transport primitive invocation recorded by a fake backend
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Seek(f64),
    Load(String),
}

#[derive(Default)]
struct Listeners {
    next_id: ListenerId,
    time: HashMap<ListenerId, TimeListener>,
    event: HashMap<ListenerId, EventListener>,
}

impl Listeners {
    fn add_time(&mut self, listener: TimeListener) -> ListenerId {
        self.next_id += 1;
        self.time.insert(self.next_id, listener);
        self.next_id
    }

    fn add_event(&mut self, listener: EventListener) -> ListenerId {
        self.next_id += 1;
        self.event.insert(self.next_id, listener);
        self.next_id
    }

    fn remove(&mut self, id: ListenerId) {
        self.time.remove(&id);
        self.event.remove(&id);
    }

    fn count(&self) -> usize {
        self.time.len() + self.event.len()
    }
}

/// Element-semantics fake recording every command it receives
#[derive(Default)]
pub struct FakeElement {
    time: Mutex<f64>,
    commands: Mutex<Vec<Command>>,
    listeners: Mutex<Listeners>,
}

impl FakeElement {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Backdoor: moves the playhead without firing listeners
    pub fn set_time(&self, seconds: f64) {
        *self.time.lock().unwrap() = seconds;
    }

    /// Moves the playhead and fires all time listeners
    pub fn emit_time(&self, seconds: f64) {
        self.set_time(seconds);
        let listeners: Vec<TimeListener> =
            self.listeners.lock().unwrap().time.values().cloned().collect();
        for listener in listeners {
            listener(seconds);
        }
    }

    /// Fires all event listeners
    pub fn emit_event(&self, event: TransportEvent) {
        let listeners: Vec<EventListener> =
            self.listeners.lock().unwrap().event.values().cloned().collect();
        for listener in listeners {
            listener(event.clone());
        }
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().count()
    }
}

impl MediaElement for FakeElement {
    fn current_time(&self) -> f64 {
        *self.time.lock().unwrap()
    }

    fn set_current_time(&self, seconds: f64) {
        self.commands.lock().unwrap().push(Command::Seek(seconds));
        *self.time.lock().unwrap() = seconds;
    }

    fn play(&self) {
        self.commands.lock().unwrap().push(Command::Play);
    }

    fn pause(&self) {
        self.commands.lock().unwrap().push(Command::Pause);
    }

    fn load(&self, url: &str) {
        self.commands.lock().unwrap().push(Command::Load(url.to_string()));
    }

    fn add_time_listener(&self, listener: TimeListener) -> ListenerId {
        self.listeners.lock().unwrap().add_time(listener)
    }

    fn add_event_listener(&self, listener: EventListener) -> ListenerId {
        self.listeners.lock().unwrap().add_event(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(id);
    }
}

/// Wrapper-semantics fake with no event channel of its own
#[derive(Default)]
pub struct FakeTransport {
    time: Mutex<f64>,
    commands: Mutex<Vec<Command>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_time(&self, seconds: f64) {
        *self.time.lock().unwrap() = seconds;
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn get_current_time(&self) -> f64 {
        *self.time.lock().unwrap()
    }

    fn seek_to(&self, seconds: f64) {
        self.commands.lock().unwrap().push(Command::Seek(seconds));
        *self.time.lock().unwrap() = seconds;
    }

    fn play(&self) {
        self.commands.lock().unwrap().push(Command::Play);
    }

    fn pause(&self) {
        self.commands.lock().unwrap().push(Command::Pause);
    }

    fn load(&self, url: &str) {
        self.commands.lock().unwrap().push(Command::Load(url.to_string()));
    }
}

/// Emitter-style fake subscription pair
#[derive(Default)]
pub struct FakeEmitter {
    listeners: Mutex<Listeners>,
}

impl FakeEmitter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn emit_time(&self, seconds: f64) {
        let listeners: Vec<TimeListener> =
            self.listeners.lock().unwrap().time.values().cloned().collect();
        for listener in listeners {
            listener(seconds);
        }
    }

    pub fn emit_event(&self, event: TransportEvent) {
        let listeners: Vec<EventListener> =
            self.listeners.lock().unwrap().event.values().cloned().collect();
        for listener in listeners {
            listener(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().count()
    }
}

impl EventEmitter for FakeEmitter {
    fn on_time(&self, listener: TimeListener) -> ListenerId {
        self.listeners.lock().unwrap().add_time(listener)
    }

    fn on_event(&self, listener: EventListener) -> ListenerId {
        self.listeners.lock().unwrap().add_event(listener)
    }

    fn off(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(id);
    }
}

/// Composable handle exposing any combination of capabilities
#[derive(Default)]
pub struct FakeHandle {
    element: Option<Arc<FakeElement>>,
    transport: Option<Arc<FakeTransport>>,
    emitter: Option<Arc<FakeEmitter>>,
    inner: Option<Arc<dyn PlayerHandle>>,
}

impl FakeHandle {
    /// A handle exposing nothing at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn element(element: Arc<FakeElement>) -> Self {
        Self {
            element: Some(element),
            ..Self::default()
        }
    }

    pub fn transport(transport: Arc<FakeTransport>) -> Self {
        Self {
            transport: Some(transport),
            ..Self::default()
        }
    }

    pub fn nested(inner: Arc<dyn PlayerHandle>) -> Self {
        Self {
            inner: Some(inner),
            ..Self::default()
        }
    }

    pub fn with_transport(mut self, transport: Arc<FakeTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_emitter(mut self, emitter: Arc<FakeEmitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }
}

impl PlayerHandle for FakeHandle {
    fn as_element(&self) -> Option<Arc<dyn MediaElement>> {
        self.element.clone().map(|e| e as Arc<dyn MediaElement>)
    }

    fn as_transport(&self) -> Option<Arc<dyn Transport>> {
        self.transport.clone().map(|t| t as Arc<dyn Transport>)
    }

    fn as_emitter(&self) -> Option<Arc<dyn EventEmitter>> {
        self.emitter.clone().map(|e| e as Arc<dyn EventEmitter>)
    }

    fn inner_player(&self) -> Option<Arc<dyn PlayerHandle>> {
        self.inner.clone()
    }
}

/// Source whose handle appears only on the Nth `handle()` call
pub struct ScriptedSource {
    ready_on_call: usize,
    calls: AtomicUsize,
    handle: Arc<dyn PlayerHandle>,
}

impl ScriptedSource {
    /// Handle available from the very first call
    pub fn ready(handle: Arc<dyn PlayerHandle>) -> Self {
        Self::ready_on_call(1, handle)
    }

    /// Handle available from the `ready_on_call`-th call onward
    pub fn ready_on_call(ready_on_call: usize, handle: Arc<dyn PlayerHandle>) -> Self {
        Self {
            ready_on_call,
            calls: AtomicUsize::new(0),
            handle,
        }
    }

    /// Number of times the probe asked for the handle
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HandleSource for ScriptedSource {
    fn handle(&self) -> Option<Arc<dyn PlayerHandle>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call >= self.ready_on_call {
            Some(self.handle.clone())
        } else {
            None
        }
    }
}

/// Source that never produces a handle
pub struct NeverReady;

impl HandleSource for NeverReady {
    fn handle(&self) -> Option<Arc<dyn PlayerHandle>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_counts_calls() {
        let handle = Arc::new(FakeHandle::element(FakeElement::new()));
        let source = ScriptedSource::ready_on_call(2, handle);

        assert!(source.handle().is_none());
        assert!(source.handle().is_some());
        assert!(source.handle().is_some());
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn test_fake_element_emit_reaches_listeners() {
        let element = FakeElement::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = element.add_time_listener(Arc::new(move |t| sink.lock().unwrap().push(t)));

        element.emit_time(9.0);
        element.remove_listener(id);
        element.emit_time(10.0);

        assert_eq!(*seen.lock().unwrap(), vec![9.0]);
    }
}
