use std::fmt;

/// Playback state owned by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing playing, no attempt in progress
    #[default]
    Idle,
    /// Opening an endpoint or waiting out the fallback delay
    Loading,
    /// A session is open and playing
    Playing,
    /// Session kept open but paused
    Paused,
    /// Every endpoint failed in the last sweep
    Error,
}

impl PlaybackState {
    /// Check if an attempt is in flight
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, PlaybackState::Loading)
    }

    /// Check if audio is playing
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Check if the last sweep was exhausted
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, PlaybackState::Error)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Loading => "loading",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Error => "error",
        };
        f.write_str(name)
    }
}
