//! Media service and session traits

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::control::Command;
use crate::control::volume::Volume;
use crate::error::PlayerError;
use crate::types::AudioMode;

/// Options passed when opening an endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenOptions {
    /// Start playing as soon as the stream is open
    pub autoplay: bool,
    /// Initial volume
    pub volume: Volume,
    /// Initial mute flag
    pub muted: bool,
}

/// Status reported by an open session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    /// Stream is loaded
    pub is_open: bool,
    /// Audio is playing
    pub is_playing: bool,
    /// Waiting on network data
    pub is_buffering: bool,
    /// Playback error, if any
    pub error: Option<String>,
}

impl SessionStatus {
    /// Status carrying only an error
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Open and playing
    #[must_use]
    pub fn playing() -> Self {
        Self {
            is_open: true,
            is_playing: true,
            ..Self::default()
        }
    }

    /// Open but stalled on data
    #[must_use]
    pub fn buffering() -> Self {
        Self {
            is_open: true,
            is_buffering: true,
            ..Self::default()
        }
    }

    /// Open but not playing, e.g. after an interruption
    #[must_use]
    pub fn paused() -> Self {
        Self {
            is_open: true,
            ..Self::default()
        }
    }

    /// Stream unloaded without an error
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }
}

/// Channel back into the controller for one session's status updates
///
/// Each sink is bound to the play attempt that created it; statuses from a
/// superseded session are discarded by the controller. The sink does not keep
/// the controller alive.
#[derive(Debug, Clone)]
pub struct StatusSink {
    generation: u64,
    tx: mpsc::WeakUnboundedSender<Command>,
}

impl StatusSink {
    pub(crate) fn new(generation: u64, tx: mpsc::WeakUnboundedSender<Command>) -> Self {
        Self { generation, tx }
    }

    /// Attempt number this sink belongs to
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deliver a status update
    ///
    /// Returns `false` if the controller has shut down.
    pub fn send(&self, status: SessionStatus) -> bool {
        let Some(tx) = self.tx.upgrade() else {
            return false;
        };
        tx.send(Command::Status {
            generation: self.generation,
            status,
        })
        .is_ok()
    }
}

/// Platform media-playback service
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Apply the host audio-session mode
    ///
    /// # Errors
    ///
    /// Returns error if the platform rejects the mode
    async fn configure(&self, _mode: &AudioMode) -> Result<(), PlayerError> {
        Ok(())
    }

    /// Open `uri` and start a session
    ///
    /// # Errors
    ///
    /// Returns error if the stream cannot be opened
    async fn open(
        &self,
        uri: &str,
        options: OpenOptions,
        status: StatusSink,
    ) -> Result<Box<dyn MediaSession>, PlayerError>;
}

/// A live audio session
#[async_trait]
pub trait MediaSession: Send {
    /// Pause playback, keeping the stream open
    ///
    /// # Errors
    ///
    /// Returns error if the session rejects the call
    async fn pause(&mut self) -> Result<(), PlayerError>;

    /// Stop playback
    ///
    /// # Errors
    ///
    /// Returns error if the session rejects the call
    async fn stop(&mut self) -> Result<(), PlayerError>;

    /// Apply a volume level
    ///
    /// # Errors
    ///
    /// Returns error if the session rejects the call
    async fn set_volume(&mut self, volume: Volume) -> Result<(), PlayerError>;

    /// Unload the stream and free the session
    ///
    /// # Errors
    ///
    /// Returns error if unloading fails; the session is gone either way
    async fn release(self: Box<Self>) -> Result<(), PlayerError>;
}
