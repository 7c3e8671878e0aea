//! The boundary controller
//!
//! Owns at most one playback session, subscribes to the adapter's update
//! stream, and turns every backend signal into a session state transition.
//! Errors never cross this boundary as panics or results mid-session; the
//! worst case is a session parked in `Error` until the user closes it.

use crate::error::{SessionError, SessionResult};
use crate::retry::{RetryAction, RetryStrategy};
use crate::session::{PlaybackSession, SessionSnapshot, SessionState};
use clipmark_adapter::{
    bind, AdapterConfig, AdapterError, HandleSource, PlayerAdapter, Subscription, TransportEvent,
};
use clipmark_core::Marker;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

/// Terminal and retry outcomes reported to the caller's UI
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    /// The handle never became controllable; the session is stuck in
    /// `Error` until closed
    AdapterUnavailable { attempts: usize },
    /// A playback failure triggered the one automatic URL fallback
    RetryingWithFallback { url: String },
    /// Retries are spent; the viewer is left in place so the user keeps
    /// context
    PlaybackFailed { reason: String },
}

/// Callback receiving session notices
pub type NoticeHandler = Arc<dyn Fn(SessionNotice) + Send + Sync>;

/// Transport work computed under the lock, executed after releasing it.
///
/// Fake backends (and some real ones) deliver events synchronously from
/// their control methods, so driving the adapter while holding the session
/// lock would deadlock.
enum Action {
    Seek(f64),
    Play,
    Pause,
    Load(String),
    Notify(SessionNotice),
}

struct Inner {
    session: Option<PlaybackSession>,
    adapter: Option<Arc<PlayerAdapter>>,
    subscriptions: Vec<Subscription>,
    /// Bumped on every load/close; stale timer and listener callbacks
    /// carrying an older value are no-ops
    generation: u64,
    config: AdapterConfig,
    retry: RetryStrategy,
    notice: Option<NoticeHandler>,
}

impl Inner {
    /// Tears down the active session synchronously: listeners detached,
    /// polling and probe timers invalidated, state back to idle.
    fn close_current(&mut self) {
        self.generation += 1;
        self.subscriptions.clear();
        self.adapter = None;
        self.session = None;
    }

    /// The one-time automatic entry into the clip: seek to the start, start
    /// playing, and wait for an update to confirm the position.
    fn begin_playback(&mut self) -> Vec<Action> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.state != SessionState::Ready {
            return Vec::new();
        }
        session.state = SessionState::Seeking;
        session.corrective_seek_done = true;
        vec![
            Action::Load(session.resource_url.to_string()),
            Action::Seek(session.clip.start()),
            Action::Play,
        ]
    }

    fn apply_time_update(&mut self, t: f64) -> Vec<Action> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        match session.state {
            SessionState::Ready | SessionState::Seeking | SessionState::Playing => {}
            // Paused, Ended, Error and Idle ignore passive updates; nothing
            // resumes without explicit user action.
            _ => return Vec::new(),
        }

        let clip = session.clip;

        if t < clip.start() {
            if session.state == SessionState::Playing {
                if !session.corrective_seek_done {
                    // Backend ignored the initial seek or reports pre-roll
                    // time; correct it exactly once.
                    session.corrective_seek_done = true;
                    session.state = SessionState::Seeking;
                    return vec![Action::Seek(clip.start())];
                }
                session.elapsed = clip.start();
            }
            // While seeking, sub-start updates are pre-seek noise; the new
            // position is only trusted once an in-clip update arrives.
            return Vec::new();
        }

        if session.state != SessionState::Playing {
            debug!("position confirmed at {:.2}s", t);
            session.state = SessionState::Playing;
        }
        session.elapsed = clip.clamp(t);

        if t >= clip.end() {
            // Clip boundary, not media end: paused, replayable.
            info!("clip boundary reached at {:.2}s; auto-pausing", t);
            session.state = SessionState::Paused;
            return vec![Action::Pause];
        }

        Vec::new()
    }

    fn apply_transport_event(&mut self, event: TransportEvent) -> Vec<Action> {
        match event {
            TransportEvent::Ended => {
                if let Some(session) = self.session.as_mut() {
                    if session.state == SessionState::Playing {
                        session.state = SessionState::Ended;
                    }
                }
                Vec::new()
            }
            TransportEvent::Error(reason) => self.apply_playback_error(reason),
        }
    }

    fn apply_playback_error(&mut self, reason: String) -> Vec<Action> {
        let retry = self.retry.clone();
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.state == SessionState::Error {
            return Vec::new();
        }

        match retry.decide(session.attempt, &session.resource_url) {
            RetryAction::Reissue(fallback) => {
                warn!(
                    "playback failed ({}); retrying without seek hint",
                    reason
                );
                session.attempt += 1;
                session.resource_url = fallback.clone();
                // The reload resets the backend position, so the automatic
                // entry seek runs again for the new attempt.
                session.corrective_seek_done = true;
                session.state = SessionState::Seeking;
                vec![
                    Action::Notify(SessionNotice::RetryingWithFallback {
                        url: fallback.to_string(),
                    }),
                    Action::Load(fallback.to_string()),
                    Action::Seek(session.clip.start()),
                    Action::Play,
                ]
            }
            RetryAction::GiveUp => {
                warn!("playback failed after fallback ({}); giving up", reason);
                session.state = SessionState::Error;
                // Leave the backend paused so the user keeps their place.
                vec![
                    Action::Pause,
                    Action::Notify(SessionNotice::PlaybackFailed { reason }),
                ]
            }
        }
    }

    fn apply_toggle(&mut self) -> Vec<Action> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let clip = session.clip;

        match session.state {
            SessionState::Playing => {
                session.state = SessionState::Paused;
                vec![Action::Pause]
            }
            SessionState::Paused if session.elapsed >= clip.end() => {
                // Manual replay from the boundary; resuming in place would
                // re-pause on the very next update.
                session.state = SessionState::Seeking;
                vec![Action::Seek(clip.start()), Action::Play]
            }
            SessionState::Paused => {
                session.state = SessionState::Playing;
                vec![Action::Play]
            }
            SessionState::Ended => {
                session.state = SessionState::Seeking;
                vec![Action::Seek(clip.start()), Action::Play]
            }
            _ => Vec::new(),
        }
    }

    fn apply_seek_fraction(&mut self, fraction: f64) -> Vec<Action> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        match session.state {
            SessionState::Playing | SessionState::Paused | SessionState::Seeking => {}
            _ => return Vec::new(),
        }

        let target = session.clip.time_at_fraction(fraction);
        session.state = SessionState::Seeking;
        vec![Action::Seek(target), Action::Play]
    }
}

/// Clamps playback of an adapted handle to one marker's clip.
///
/// Cloning shares the controller; exactly one session is active across all
/// clones, and loading a new one implicitly cancels the old.
#[derive(Clone)]
pub struct BoundaryController {
    inner: Arc<Mutex<Inner>>,
}

impl BoundaryController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: None,
                adapter: None,
                subscriptions: Vec::new(),
                generation: 0,
                config: AdapterConfig::default(),
                retry: RetryStrategy::default(),
                notice: None,
            })),
        }
    }

    pub fn with_config(self, config: AdapterConfig) -> Self {
        self.inner.lock().unwrap().config = config;
        self
    }

    pub fn with_retry(self, retry: RetryStrategy) -> Self {
        self.inner.lock().unwrap().retry = retry;
        self
    }

    /// Registers a callback for terminal and retry notices
    pub fn with_notice_handler(self, handler: NoticeHandler) -> Self {
        self.inner.lock().unwrap().notice = Some(handler);
        self
    }

    /// Starts a session for `marker`, replacing any active one.
    ///
    /// Resolves once the handle is bound and playback has been issued, or
    /// with an error once the probe budget is spent. A session superseded
    /// while probing resolves quietly with `Ok`.
    pub async fn load(
        &self,
        marker: Marker,
        base_url: &str,
        source: Arc<dyn HandleSource>,
    ) -> SessionResult<()> {
        let (generation, config) = {
            let mut inner = self.inner.lock().unwrap();
            inner.close_current();
            inner.session = Some(PlaybackSession::new(marker, base_url));
            (inner.generation, inner.config.clone())
        };

        match bind(source.as_ref(), &config).await {
            Ok(adapter) => {
                let adapter = Arc::new(adapter);
                let (actions, adapter_ref, notice) = {
                    let mut inner = self.inner.lock().unwrap();
                    if inner.generation != generation {
                        // Closed or replaced while probing.
                        return Ok(());
                    }
                    if let Some(session) = inner.session.as_mut() {
                        // Transient within this turn: the entry seek is
                        // issued below before the lock is released.
                        session.state = SessionState::Ready;
                    }

                    let time_subscription = {
                        let inner_arc = Arc::clone(&self.inner);
                        adapter.subscribe_time_updates(Arc::new(move |t| {
                            on_time_update(&inner_arc, generation, t);
                        }))
                    };
                    let event_subscription = {
                        let inner_arc = Arc::clone(&self.inner);
                        adapter.subscribe_events(Arc::new(move |event| {
                            on_transport_event(&inner_arc, generation, event);
                        }))
                    };

                    inner.subscriptions = vec![time_subscription, event_subscription];
                    inner.adapter = Some(Arc::clone(&adapter));
                    let actions = inner.begin_playback();
                    (actions, inner.adapter.clone(), inner.notice.clone())
                };
                dispatch(actions, adapter_ref, notice);
                Ok(())
            }
            Err(AdapterError::Unavailable { attempts }) => {
                let notice = {
                    let mut inner = self.inner.lock().unwrap();
                    if inner.generation != generation {
                        return Ok(());
                    }
                    if let Some(session) = inner.session.as_mut() {
                        session.state = SessionState::Error;
                    }
                    inner.notice.clone()
                };
                if let Some(handler) = notice {
                    handler(SessionNotice::AdapterUnavailable { attempts });
                }
                Err(SessionError::AdapterUnavailable { attempts })
            }
        }
    }

    /// User play/pause toggle
    pub fn toggle(&self) {
        let (actions, adapter, notice) = {
            let mut inner = self.inner.lock().unwrap();
            (inner.apply_toggle(), inner.adapter.clone(), inner.notice.clone())
        };
        dispatch(actions, adapter, notice);
    }

    /// User drag of the progress control; `fraction` is clamped to `[0, 1]`
    /// within the clip
    pub fn seek_fraction(&self, fraction: f64) {
        let (actions, adapter, notice) = {
            let mut inner = self.inner.lock().unwrap();
            (
                inner.apply_seek_fraction(fraction),
                inner.adapter.clone(),
                inner.notice.clone(),
            )
        };
        dispatch(actions, adapter, notice);
    }

    /// Tears down the active session: all listeners detached and timers
    /// invalidated synchronously, state back to idle.
    pub fn close(&self) {
        self.inner.lock().unwrap().close_current();
    }

    /// Current view of the session for the caller's UI
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().unwrap();
        match &inner.session {
            Some(session) => session.snapshot(),
            None => SessionSnapshot::idle(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.snapshot().state
    }
}

impl Default for BoundaryController {
    fn default() -> Self {
        Self::new()
    }
}

fn on_time_update(inner: &Arc<Mutex<Inner>>, generation: u64, t: f64) {
    let (actions, adapter, notice) = {
        let mut guard = inner.lock().unwrap();
        if guard.generation != generation {
            return;
        }
        (guard.apply_time_update(t), guard.adapter.clone(), guard.notice.clone())
    };
    dispatch(actions, adapter, notice);
}

fn on_transport_event(inner: &Arc<Mutex<Inner>>, generation: u64, event: TransportEvent) {
    let (actions, adapter, notice) = {
        let mut guard = inner.lock().unwrap();
        if guard.generation != generation {
            return;
        }
        (
            guard.apply_transport_event(event),
            guard.adapter.clone(),
            guard.notice.clone(),
        )
    };
    dispatch(actions, adapter, notice);
}

fn dispatch(actions: Vec<Action>, adapter: Option<Arc<PlayerAdapter>>, notice: Option<NoticeHandler>) {
    for action in actions {
        match action {
            Action::Seek(seconds) => {
                if let Some(adapter) = &adapter {
                    adapter.seek_to(seconds);
                }
            }
            Action::Play => {
                if let Some(adapter) = &adapter {
                    adapter.play();
                }
            }
            Action::Pause => {
                if let Some(adapter) = &adapter {
                    adapter.pause();
                }
            }
            Action::Load(url) => {
                if let Some(adapter) = &adapter {
                    adapter.load(&url);
                }
            }
            Action::Notify(event) => {
                if let Some(handler) = &notice {
                    handler(event);
                }
            }
        }
    }
}
