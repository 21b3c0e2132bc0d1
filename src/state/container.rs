//! Observable player state

use tokio::sync::watch;

use crate::control::volume::{Volume, VolumeLevel};
use crate::types::PlaybackState;

/// Main control the presentation layer should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Attempt in progress, nothing to press
    Connecting,
    /// Sweep exhausted, offer retry
    Retry,
    /// Playing, offer pause
    Pause,
    /// Idle or paused, offer play
    Play,
}

/// Read-only view of the controller
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    /// Current playback state
    pub state: PlaybackState,
    /// Cursor into the endpoint list
    pub current_index: usize,
    /// Number of configured endpoints
    pub endpoint_count: usize,
    /// Endpoint at `current_index`
    pub current_uri: String,
    /// Stored volume
    pub volume: Volume,
    /// Mute flag
    pub is_muted: bool,
    /// Last sweep exhausted every endpoint
    pub has_error: bool,
    /// Attempt in flight or session buffering
    pub is_loading: bool,
    /// Session open and playing
    pub is_playing: bool,
    /// Session stalled on network data
    pub is_buffering: bool,
}

impl PlayerSnapshot {
    /// Initial snapshot before any operation
    #[must_use]
    pub fn initial(first_uri: &str, endpoint_count: usize, volume: Volume) -> Self {
        Self {
            state: PlaybackState::Idle,
            current_index: 0,
            endpoint_count,
            current_uri: first_uri.to_string(),
            volume,
            is_muted: volume.is_zero(),
            has_error: false,
            is_loading: false,
            is_playing: false,
            is_buffering: false,
        }
    }

    /// Which main control to show
    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        if self.is_loading {
            PrimaryAction::Connecting
        } else if self.has_error {
            PrimaryAction::Retry
        } else if self.is_playing {
            PrimaryAction::Pause
        } else {
            PrimaryAction::Play
        }
    }

    /// Volume indicator level
    #[must_use]
    pub fn volume_level(&self) -> VolumeLevel {
        if self.is_muted {
            VolumeLevel::Muted
        } else {
            self.volume.level()
        }
    }
}

/// State container with change notifications
pub struct StateContainer {
    tx: watch::Sender<PlayerSnapshot>,
}

impl StateContainer {
    /// Create a container holding `initial`
    #[must_use]
    pub fn new(initial: PlayerSnapshot) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Get current snapshot
    #[must_use]
    pub fn get(&self) -> PlayerSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.tx.subscribe()
    }

    /// Update the snapshot in place, notifying subscribers only on change
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut PlayerSnapshot),
    {
        self.tx.send_if_modified(|snapshot| {
            let before = snapshot.clone();
            f(snapshot);
            *snapshot != before
        });
    }
}
