//! Playback control with ordered endpoint fallback
//!
//! The controller runs as a single task that owns the playback state, the
//! endpoint cursor, the volume state and the one live session. User
//! operations and session status callbacks are both delivered as messages to
//! that task, so no two handlers ever mutate state at the same time.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use super::fallback::FallbackTimer;
use super::volume::{Volume, VolumeState};
use crate::error::PlayerError;
use crate::media::{MediaService, MediaSession, OpenOptions, SessionStatus, StatusSink};
use crate::state::{EventBus, PlayerEvent, PlayerSnapshot, StateContainer};
use crate::types::{EndpointList, PlaybackState, PlayerConfig};

/// Messages handled by the controller task
#[derive(Debug)]
pub(crate) enum Command {
    Play {
        reply: oneshot::Sender<()>,
    },
    Pause {
        reply: oneshot::Sender<()>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    Retry {
        reply: oneshot::Sender<()>,
    },
    SetVolume {
        level: f32,
        reply: oneshot::Sender<Volume>,
    },
    ToggleMute {
        reply: oneshot::Sender<Volume>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
    /// Status callback from the session opened by attempt `generation`
    Status {
        generation: u64,
        status: SessionStatus,
    },
    /// Fallback delay for attempt `generation` elapsed
    FallbackElapsed {
        generation: u64,
    },
}

/// Playback controller
///
/// Cheap to clone; all clones talk to the same controller task. The task
/// shuts down, releasing any session and cancelling any pending fallback,
/// when [`shutdown`](Self::shutdown) is called or the last clone is dropped.
#[derive(Clone)]
pub struct PlaybackController {
    /// Mailbox of the controller task
    tx: mpsc::UnboundedSender<Command>,
    /// Published snapshots
    state: Arc<StateContainer>,
    /// Event bus
    events: Arc<EventBus>,
}

impl PlaybackController {
    /// Create a controller and spawn its task
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new(service: Arc<dyn MediaService>, config: PlayerConfig) -> Self {
        let volume = VolumeState::new(
            Volume::new(config.initial_volume),
            Volume::new(config.unmute_volume),
        );
        let first_uri = config.endpoints.get(0).unwrap_or_default();
        let state = Arc::new(StateContainer::new(PlayerSnapshot::initial(
            first_uri,
            config.endpoints.len(),
            volume.volume(),
        )));
        let events = Arc::new(EventBus::new(config.event_capacity));

        let (tx, rx) = mpsc::unbounded_channel();
        let actor = PlaybackActor {
            service,
            endpoints: config.endpoints,
            fallback_delay: config.fallback_delay,
            audio_mode: config.audio_mode,
            rx,
            weak_tx: tx.downgrade(),
            state: Arc::clone(&state),
            events: Arc::clone(&events),
            playback: PlaybackState::Idle,
            index: 0,
            volume,
            buffering: false,
            session: None,
            generation: 0,
            fallback: None,
            sweep_attempts: 0,
        };
        tokio::spawn(actor.run());

        Self { tx, state, events }
    }

    /// Start playing the endpoint at the current cursor
    ///
    /// Any live session is released first. Failures are handled by the
    /// fallback sweep and show up in the published state.
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller has shut down
    pub async fn play(&self) -> Result<(), PlayerError> {
        self.request(|reply| Command::Play { reply }).await
    }

    /// Pause the live session
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller has shut down
    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.request(|reply| Command::Pause { reply }).await
    }

    /// Stop and release the live session and cancel any pending fallback
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller has shut down
    pub async fn stop(&self) -> Result<(), PlayerError> {
        self.request(|reply| Command::Stop { reply }).await
    }

    /// Reset the cursor to the first endpoint and play
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller has shut down
    pub async fn retry(&self) -> Result<(), PlayerError> {
        self.request(|reply| Command::Retry { reply }).await
    }

    /// Set volume, clamped to 0.0 - 1.0; zero mutes
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller has shut down
    pub async fn set_volume(&self, level: f32) -> Result<Volume, PlayerError> {
        self.request(|reply| Command::SetVolume { level, reply })
            .await
    }

    /// Toggle mute, restoring the last audible volume on unmute
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller has shut down
    pub async fn toggle_mute(&self) -> Result<Volume, PlayerError> {
        self.request(|reply| Command::ToggleMute { reply }).await
    }

    /// Release the session, cancel pending fallback and stop the task
    ///
    /// # Errors
    ///
    /// Returns `ControllerClosed` if the controller was already shut down
    pub async fn shutdown(&self) -> Result<(), PlayerError> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.state.get()
    }

    /// Current playback state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state.get().state
    }

    /// Cursor into the endpoint list
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.get().current_index
    }

    /// Stored volume
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.state.get().volume
    }

    /// Mute flag
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.state.get().is_muted
    }

    /// Last sweep exhausted every endpoint
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.state.get().has_error
    }

    /// Attempt in flight or buffering
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.get().is_loading
    }

    /// Session open and playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.get().is_playing
    }

    /// Subscribe to snapshot changes
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<PlayerSnapshot> {
        self.state.subscribe()
    }

    /// Subscribe to events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Event bus, for building filters
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Check if the controller task is still running
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, PlayerError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| PlayerError::ControllerClosed)?;
        rx.await.map_err(|_| PlayerError::ControllerClosed)
    }
}

/// Session owned by the controller
struct ActiveSession {
    session: Box<dyn MediaSession>,
    generation: u64,
    uri: String,
}

/// Controller task state
struct PlaybackActor {
    service: Arc<dyn MediaService>,
    endpoints: EndpointList,
    fallback_delay: std::time::Duration,
    audio_mode: crate::types::AudioMode,
    rx: mpsc::UnboundedReceiver<Command>,
    /// Handed to sinks and timers; does not keep the mailbox open
    weak_tx: mpsc::WeakUnboundedSender<Command>,
    state: Arc<StateContainer>,
    events: Arc<EventBus>,
    playback: PlaybackState,
    index: usize,
    volume: VolumeState,
    buffering: bool,
    session: Option<ActiveSession>,
    /// Incremented on every open attempt
    generation: u64,
    fallback: Option<FallbackTimer>,
    sweep_attempts: usize,
}

impl PlaybackActor {
    async fn run(mut self) {
        if let Err(e) = self.service.configure(&self.audio_mode).await {
            warn!("Failed to set audio mode: {}", e);
        }

        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Play { reply } => {
                    self.sweep_attempts = 0;
                    self.cancel_fallback();
                    self.attempt().await;
                    let _ = reply.send(());
                }
                Command::Pause { reply } => {
                    self.pause().await;
                    let _ = reply.send(());
                }
                Command::Stop { reply } => {
                    self.stop().await;
                    let _ = reply.send(());
                }
                Command::Retry { reply } => {
                    info!("Retrying from the first endpoint");
                    self.cancel_fallback();
                    self.index = 0;
                    self.sweep_attempts = 0;
                    self.attempt().await;
                    let _ = reply.send(());
                }
                Command::SetVolume { level, reply } => {
                    let volume = self.volume.set(level);
                    self.apply_volume(volume).await;
                    let _ = reply.send(volume);
                }
                Command::ToggleMute { reply } => {
                    let volume = self.volume.toggle_mute();
                    self.apply_volume(volume).await;
                    let _ = reply.send(volume);
                }
                Command::Status { generation, status } => {
                    self.on_status(generation, status).await;
                }
                Command::FallbackElapsed { generation } => {
                    let current = self.fallback.as_ref().map(FallbackTimer::generation);
                    if current == Some(generation) {
                        self.fallback = None;
                        self.attempt().await;
                    } else {
                        debug!("Ignoring stale fallback timer {}", generation);
                    }
                }
                Command::Shutdown { reply } => {
                    self.teardown().await;
                    let _ = reply.send(());
                    return;
                }
            }
        }

        // Every handle dropped
        self.teardown().await;
    }

    /// Open the endpoint at the cursor, releasing any previous session first
    async fn attempt(&mut self) {
        self.release_session().await;
        self.buffering = false;
        self.set_state(PlaybackState::Loading);

        let Some(uri) = self.endpoints.get(self.index).map(ToString::to_string) else {
            error!("Endpoint cursor {} out of range", self.index);
            self.set_state(PlaybackState::Error);
            return;
        };

        self.generation += 1;
        self.sweep_attempts += 1;
        let generation = self.generation;

        info!(
            "Attempting stream endpoint {}/{}: {}",
            self.index + 1,
            self.endpoints.len(),
            uri
        );
        self.events.emit(PlayerEvent::AttemptStarted {
            index: self.index,
            uri: uri.clone(),
        });

        let options = OpenOptions {
            autoplay: true,
            volume: self.volume.volume(),
            muted: self.volume.is_muted(),
        };
        let sink = StatusSink::new(generation, self.weak_tx.clone());

        match self.service.open(&uri, options, sink).await {
            Ok(session) => {
                self.session = Some(ActiveSession {
                    session,
                    generation,
                    uri,
                });
                info!("Stream started");
                self.set_state(PlaybackState::Playing);
            }
            Err(e) => {
                warn!("Error opening {}: {}", uri, e);
                self.fail(&e).await;
            }
        }
    }

    /// Advance to the next endpoint after a delay, or stop the sweep
    async fn fail(&mut self, error: &PlayerError) {
        self.release_session().await;
        self.buffering = false;

        if self.endpoints.is_last(self.index) {
            error!(
                "All stream endpoints failed after {} attempts",
                self.sweep_attempts
            );
            self.events.emit(PlayerEvent::Exhausted {
                attempts: self.sweep_attempts,
                message: error.to_string(),
            });
            self.set_state(PlaybackState::Error);
            return;
        }

        let failed_index = self.index;
        self.index += 1;
        info!(
            "Trying endpoint {} in {:?}",
            self.index + 1,
            self.fallback_delay
        );
        self.fallback = Some(FallbackTimer::schedule(
            self.fallback_delay,
            self.generation,
            self.index,
            self.weak_tx.clone(),
        ));
        self.events.emit(PlayerEvent::FallbackScheduled {
            failed_index,
            next_index: self.index,
            delay: self.fallback_delay,
        });
        self.set_state(PlaybackState::Loading);
    }

    async fn on_status(&mut self, generation: u64, status: SessionStatus) {
        let uri = match self.session.as_ref() {
            Some(active) if active.generation == generation => active.uri.clone(),
            _ => {
                debug!("Ignoring status from superseded session {}", generation);
                return;
            }
        };

        // Only a session that is meant to be playing starts the sweep
        if let Some(message) = status.error {
            if self.playback.is_playing() {
                error!("Audio playback error: {}", message);
                self.fail(&PlayerError::PlaybackFailed { uri, message }).await;
            } else {
                warn!("Playback error on {} session {}: {}", self.playback, uri, message);
                self.close_session().await;
            }
            return;
        }

        if !status.is_open {
            info!("Session for {} closed", uri);
            self.close_session().await;
            return;
        }

        if status.is_buffering != self.buffering {
            debug!("Buffering: {}", status.is_buffering);
            self.buffering = status.is_buffering;
            self.events.emit(PlayerEvent::BufferingChanged {
                buffering: self.buffering,
            });
        }

        let next = match self.playback {
            PlaybackState::Playing if !status.is_playing && !status.is_buffering => {
                PlaybackState::Paused
            }
            PlaybackState::Paused if status.is_playing => PlaybackState::Playing,
            current => current,
        };
        self.set_state(next);
    }

    /// Drop the live session without starting the sweep
    async fn close_session(&mut self) {
        self.release_session().await;
        self.buffering = false;
        self.set_state(PlaybackState::Idle);
    }

    async fn pause(&mut self) {
        let Some(active) = self.session.as_mut() else {
            debug!("Pause ignored: no active session");
            return;
        };

        let result = active.session.pause().await;
        match result {
            Ok(()) => self.set_state(PlaybackState::Paused),
            Err(e) => self.control_failed("pause", &e),
        }
    }

    async fn stop(&mut self) {
        let cancelled = self.cancel_fallback();

        if let Some(active) = self.session.as_mut() {
            let result = active.session.stop().await;
            match result {
                Ok(()) => self.close_session().await,
                Err(e) => self.control_failed("stop", &e),
            }
        } else if cancelled {
            self.set_state(PlaybackState::Idle);
        } else {
            debug!("Stop ignored: no active session");
        }
    }

    async fn apply_volume(&mut self, volume: Volume) {
        debug!(
            "Volume {:.2} (muted: {})",
            volume.as_f32(),
            self.volume.is_muted()
        );

        let applied = self.volume.applied();
        if let Some(active) = self.session.as_mut() {
            let result = active.session.set_volume(applied).await;
            if let Err(e) = result {
                self.control_failed("set volume", &e);
            }
        }

        let previous = self.state.get();
        if previous.volume != volume {
            self.events.emit(PlayerEvent::VolumeChanged {
                volume: volume.as_f32(),
            });
        }
        if previous.is_muted != self.volume.is_muted() {
            self.events.emit(PlayerEvent::MuteChanged {
                muted: self.volume.is_muted(),
            });
        }
        self.publish();
    }

    /// Returns whether a timer was pending
    fn cancel_fallback(&mut self) -> bool {
        match self.fallback.take() {
            Some(timer) => {
                info!("Cancelled pending fallback to endpoint {}", timer.next_index() + 1);
                self.events.emit(PlayerEvent::FallbackCancelled {
                    next_index: timer.next_index(),
                });
                true
            }
            None => false,
        }
    }

    async fn release_session(&mut self) {
        if let Some(active) = self.session.take() {
            debug!("Releasing session for {}", active.uri);
            if let Err(e) = active.session.release().await {
                self.control_failed("release", &e);
            }
        }
    }

    async fn teardown(&mut self) {
        info!("Shutting down playback controller");
        self.cancel_fallback();
        self.close_session().await;
    }

    fn control_failed(&self, operation: &'static str, error: &PlayerError) {
        warn!("Error during {}: {}", operation, error);
        self.events.emit(PlayerEvent::ControlFailed {
            operation,
            message: error.to_string(),
        });
    }

    fn set_state(&mut self, new: PlaybackState) {
        let old = self.playback;
        self.playback = new;
        if old != new {
            debug!("Playback state {} -> {}", old, new);
            self.events.emit(PlayerEvent::StateChanged { old, new });
        }
        self.publish();
    }

    fn publish(&self) {
        let playback = self.playback;
        let index = self.index;
        let uri = self.endpoints.get(index).unwrap_or_default();
        let volume = self.volume.volume();
        let muted = self.volume.is_muted();
        let buffering = self.buffering;

        self.state.update(|s| {
            s.state = playback;
            s.current_index = index;
            if s.current_uri != uri {
                s.current_uri = uri.to_string();
            }
            s.volume = volume;
            s.is_muted = muted;
            s.has_error = playback.is_error();
            s.is_loading = playback.is_loading() || buffering;
            s.is_playing = playback.is_playing();
            s.is_buffering = buffering;
        });
    }
}
