//! Scripted media service for testing the controller without a platform player.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::control::volume::Volume;
use crate::error::PlayerError;
use crate::media::{MediaService, MediaSession, OpenOptions, SessionStatus, StatusSink};
use crate::types::AudioMode;

/// What `open` does for a given URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenBehavior {
    /// Open succeeds
    Succeed,
    /// Open fails with the message
    Fail(String),
}

/// A recorded `open` call
#[derive(Debug, Clone)]
pub struct OpenAttempt {
    /// Requested URI
    pub uri: String,
    /// Options passed
    pub options: OpenOptions,
    /// Time of the call (tokio clock, so paused-time tests see exact delays)
    pub at: Instant,
}

/// A recorded session control call
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    /// `pause`
    Pause(String),
    /// `stop`
    Stop(String),
    /// `set_volume`
    SetVolume(String, Volume),
    /// `release`
    Release(String),
}

#[derive(Default)]
struct MockState {
    default_behavior: Option<OpenBehavior>,
    per_uri: HashMap<String, OpenBehavior>,
    attempts: Vec<OpenAttempt>,
    sinks: Vec<StatusSink>,
    calls: Vec<SessionCall>,
    live: usize,
    max_live: usize,
    fail_controls: bool,
    configured: Option<AudioMode>,
    fail_configure: bool,
}

/// Mock media service
///
/// Clones share state, so a test can keep one handle while the controller
/// owns another.
#[derive(Clone, Default)]
pub struct MockMediaService {
    inner: Arc<Mutex<MockState>>,
}

impl MockMediaService {
    /// Service whose opens all succeed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service whose opens all fail
    #[must_use]
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.lock().default_behavior = Some(OpenBehavior::Fail("connection refused".to_string()));
        mock
    }

    /// Script the outcome for one URI
    #[must_use]
    pub fn with_behavior(self, uri: &str, behavior: OpenBehavior) -> Self {
        self.set_behavior(uri, behavior);
        self
    }

    /// Change the outcome for one URI on a shared handle
    pub fn set_behavior(&self, uri: &str, behavior: OpenBehavior) {
        self.lock().per_uri.insert(uri.to_string(), behavior);
    }

    /// Make every open of `uri` fail
    #[must_use]
    pub fn fail_uri(self, uri: &str) -> Self {
        self.with_behavior(uri, OpenBehavior::Fail(format!("{uri} unreachable")))
    }

    /// Make every open of `uri` succeed
    #[must_use]
    pub fn succeed_uri(self, uri: &str) -> Self {
        self.with_behavior(uri, OpenBehavior::Succeed)
    }

    /// Make pause, stop and set volume fail on every session
    pub fn set_fail_controls(&self, fail: bool) {
        self.lock().fail_controls = fail;
    }

    /// Make `configure` fail
    pub fn set_fail_configure(&self, fail: bool) {
        self.lock().fail_configure = fail;
    }

    /// All open calls so far
    #[must_use]
    pub fn attempts(&self) -> Vec<OpenAttempt> {
        self.lock().attempts.clone()
    }

    /// URIs passed to open, in order
    #[must_use]
    pub fn opened_uris(&self) -> Vec<String> {
        self.lock().attempts.iter().map(|a| a.uri.clone()).collect()
    }

    /// Session control calls so far
    #[must_use]
    pub fn calls(&self) -> Vec<SessionCall> {
        self.lock().calls.clone()
    }

    /// Sessions opened and not yet released
    #[must_use]
    pub fn live_sessions(&self) -> usize {
        self.lock().live
    }

    /// Highest number of simultaneously live sessions seen
    #[must_use]
    pub fn max_live_sessions(&self) -> usize {
        self.lock().max_live
    }

    /// Mode passed to `configure`, if called
    #[must_use]
    pub fn configured_mode(&self) -> Option<AudioMode> {
        self.lock().configured
    }

    /// Push a status through the sink of the most recent open
    pub fn emit_status(&self, status: SessionStatus) -> bool {
        let sink = self.lock().sinks.last().cloned();
        sink.is_some_and(|sink| sink.send(status))
    }

    /// Push a status through the sink of the `n`th open call
    pub fn emit_status_to(&self, n: usize, status: SessionStatus) -> bool {
        let sink = self.lock().sinks.get(n).cloned();
        sink.is_some_and(|sink| sink.send(status))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl MediaService for MockMediaService {
    async fn configure(&self, mode: &AudioMode) -> Result<(), PlayerError> {
        let mut state = self.lock();
        if state.fail_configure {
            return Err(PlayerError::control("configure", "audio mode rejected"));
        }
        state.configured = Some(*mode);
        Ok(())
    }

    async fn open(
        &self,
        uri: &str,
        options: OpenOptions,
        status: StatusSink,
    ) -> Result<Box<dyn MediaSession>, PlayerError> {
        let mut state = self.lock();
        state.attempts.push(OpenAttempt {
            uri: uri.to_string(),
            options,
            at: Instant::now(),
        });
        state.sinks.push(status);

        let behavior = state
            .per_uri
            .get(uri)
            .or(state.default_behavior.as_ref())
            .cloned()
            .unwrap_or(OpenBehavior::Succeed);

        match behavior {
            OpenBehavior::Succeed => {
                state.live += 1;
                state.max_live = state.max_live.max(state.live);
                Ok(Box::new(MockSession {
                    uri: uri.to_string(),
                    inner: Arc::clone(&self.inner),
                }))
            }
            OpenBehavior::Fail(message) => Err(PlayerError::OpenFailed {
                uri: uri.to_string(),
                message,
            }),
        }
    }
}

struct MockSession {
    uri: String,
    inner: Arc<Mutex<MockState>>,
}

impl MockSession {
    fn record(&self, call: SessionCall, operation: &'static str) -> Result<(), PlayerError> {
        let mut state = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.calls.push(call);
        if state.fail_controls {
            Err(PlayerError::control(operation, "session is broken"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MediaSession for MockSession {
    async fn pause(&mut self) -> Result<(), PlayerError> {
        self.record(SessionCall::Pause(self.uri.clone()), "pause")
    }

    async fn stop(&mut self) -> Result<(), PlayerError> {
        self.record(SessionCall::Stop(self.uri.clone()), "stop")
    }

    async fn set_volume(&mut self, volume: Volume) -> Result<(), PlayerError> {
        self.record(SessionCall::SetVolume(self.uri.clone(), volume), "set volume")
    }

    async fn release(self: Box<Self>) -> Result<(), PlayerError> {
        let mut state = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.calls.push(SessionCall::Release(self.uri.clone()));
        state.live = state.live.saturating_sub(1);
        Ok(())
    }
}
