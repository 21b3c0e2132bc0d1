//! Test doubles for driving the playback controller

pub mod mock_media;

pub use mock_media::{MockMediaService, OpenAttempt, OpenBehavior, SessionCall};

use std::time::Duration;

use crate::types::{EndpointList, PlayerConfig};

/// Helper to build a config over `uris` with the given fallback delay.
///
/// # Panics
///
/// Panics if `uris` is empty or holds a blank entry.
#[must_use]
pub fn test_config(uris: &[&str], fallback_delay: Duration) -> PlayerConfig {
    let endpoints = EndpointList::new(uris.iter().copied()).expect("valid test endpoints");
    PlayerConfig::builder()
        .endpoints(endpoints)
        .fallback_delay(fallback_delay)
        .build()
}
