//! Event bus for player events

use std::time::Duration;

use tokio::sync::broadcast;

use crate::types::PlaybackState;

/// Player events
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    // Playback events
    /// Playback state changed
    StateChanged {
        /// Old state
        old: PlaybackState,
        /// New state
        new: PlaybackState,
    },
    /// An endpoint is being opened
    AttemptStarted {
        /// Endpoint index
        index: usize,
        /// Endpoint URI
        uri: String,
    },
    /// Session buffering changed
    BufferingChanged {
        /// New buffering flag
        buffering: bool,
    },

    // Fallback events
    /// An endpoint failed and the next one is scheduled
    FallbackScheduled {
        /// Index that failed
        failed_index: usize,
        /// Index that will be tried
        next_index: usize,
        /// Wait before the next attempt
        delay: Duration,
    },
    /// A pending fallback attempt was cancelled
    FallbackCancelled {
        /// Index that would have been tried
        next_index: usize,
    },
    /// Every endpoint failed in this sweep
    Exhausted {
        /// Open attempts made in the sweep
        attempts: usize,
        /// Last failure message
        message: String,
    },

    // Volume events
    /// Volume changed
    VolumeChanged {
        /// New volume level
        volume: f32,
    },
    /// Mute state changed
    MuteChanged {
        /// New mute state
        muted: bool,
    },

    // Error events
    /// A best-effort session call failed
    ControlFailed {
        /// Operation name
        operation: &'static str,
        /// Error message
        message: String,
    },
}

/// Event bus for distributing events
pub struct EventBus {
    /// Broadcast sender
    tx: broadcast::Sender<PlayerEvent>,
}

impl EventBus {
    /// Create a new event bus
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Emit an event
    pub fn emit(&self, event: PlayerEvent) {
        // Ignore error if no receivers
        let _ = self.tx.send(event);
    }

    /// Get subscriber count
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Event filter for selective subscription
pub struct EventFilter {
    rx: broadcast::Receiver<PlayerEvent>,
    filter: Box<dyn Fn(&PlayerEvent) -> bool + Send>,
}

impl EventFilter {
    /// Create a filtered event receiver
    pub fn new<F>(bus: &EventBus, filter: F) -> Self
    where
        F: Fn(&PlayerEvent) -> bool + Send + 'static,
    {
        Self {
            rx: bus.subscribe(),
            filter: Box::new(filter),
        }
    }

    /// Receive next matching event
    pub async fn recv(&mut self) -> Option<PlayerEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if (self.filter)(&event) => return Some(event),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Helper functions for common filters
impl EventFilter {
    /// Filter for playback and fallback events
    #[must_use]
    pub fn playback_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| {
            matches!(
                e,
                PlayerEvent::StateChanged { .. }
                    | PlayerEvent::AttemptStarted { .. }
                    | PlayerEvent::BufferingChanged { .. }
                    | PlayerEvent::FallbackScheduled { .. }
                    | PlayerEvent::FallbackCancelled { .. }
                    | PlayerEvent::Exhausted { .. }
            )
        })
    }

    /// Filter for volume events only
    #[must_use]
    pub fn volume_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| {
            matches!(
                e,
                PlayerEvent::VolumeChanged { .. } | PlayerEvent::MuteChanged { .. }
            )
        })
    }

    /// Filter for failures only
    #[must_use]
    pub fn error_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| {
            matches!(
                e,
                PlayerEvent::Exhausted { .. } | PlayerEvent::ControlFailed { .. }
            )
        })
    }
}
