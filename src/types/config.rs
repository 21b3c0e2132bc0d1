use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::endpoint::EndpointList;

/// Host audio-session behaviour requested when the controller starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMode {
    /// Keep playing while the app is in the background
    pub stays_active_in_background: bool,
    /// Play even when the device ringer is silenced
    pub plays_in_silent_mode: bool,
    /// Lower other apps' audio instead of pausing it
    pub duck_others: bool,
    /// Do not mix with other audio sources
    pub exclusive: bool,
}

impl Default for AudioMode {
    fn default() -> Self {
        Self {
            stays_active_in_background: true,
            plays_in_silent_mode: true,
            duck_others: true,
            exclusive: true,
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Candidate stream endpoints in fallback order (default: built-in station list)
    pub endpoints: EndpointList,

    /// Wait before trying the next endpoint after a failure (default: 2 seconds)
    #[serde(with = "duration_ms")]
    pub fallback_delay: Duration,

    /// Volume applied before the user touches it (default: 1.0)
    pub initial_volume: f32,

    /// Volume restored by unmute when no non-zero volume was recorded (default: 0.5)
    pub unmute_volume: f32,

    /// Capacity of the event broadcast channel (default: 100)
    pub event_capacity: usize,

    /// Audio session mode applied at startup
    pub audio_mode: AudioMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointList::default(),
            fallback_delay: Duration::from_secs(2),
            initial_volume: 1.0,
            unmute_volume: 0.5,
            event_capacity: 100,
            audio_mode: AudioMode::default(),
        }
    }
}

impl PlayerConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> PlayerConfigBuilder {
        PlayerConfigBuilder::default()
    }
}

/// Builder for `PlayerConfig`
#[derive(Debug, Clone, Default)]
pub struct PlayerConfigBuilder {
    config: PlayerConfig,
}

impl PlayerConfigBuilder {
    /// Set the endpoint list
    #[must_use]
    pub fn endpoints(mut self, endpoints: EndpointList) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Set the fallback delay
    #[must_use]
    pub fn fallback_delay(mut self, delay: Duration) -> Self {
        self.config.fallback_delay = delay;
        self
    }

    /// Set the initial volume (clamped to 0.0 - 1.0 when applied)
    #[must_use]
    pub fn initial_volume(mut self, volume: f32) -> Self {
        self.config.initial_volume = volume;
        self
    }

    /// Set the unmute fallback volume
    #[must_use]
    pub fn unmute_volume(mut self, volume: f32) -> Self {
        self.config.unmute_volume = volume;
        self
    }

    /// Set the event channel capacity
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity.max(1);
        self
    }

    /// Set the audio session mode
    #[must_use]
    pub fn audio_mode(mut self, mode: AudioMode) -> Self {
        self.config.audio_mode = mode;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> PlayerConfig {
        self.config
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation, reason = "delays fit in u64 millis")]
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
