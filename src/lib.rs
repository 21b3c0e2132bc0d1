//! # radiostream
//!
//! Playback control for an internet radio station reachable through several
//! equivalent stream endpoints.
//!
//! ## Features
//!
//! - Ordered endpoint fallback with a fixed, cancellable delay
//! - Volume and mute bookkeeping with unmute restore
//! - Observable snapshots and a broadcast event stream
//! - Persisted dark/light display preference
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use radiostream::testing::MockMediaService;
//! use radiostream::{PlaybackController, PlayerConfig};
//!
//! # async fn example() -> Result<(), radiostream::PlayerError> {
//! let service = Arc::new(MockMediaService::new());
//! let controller = PlaybackController::new(service, PlayerConfig::default());
//!
//! controller.play().await?;
//! controller.set_volume(0.6).await?;
//!
//! let mut state = controller.subscribe_state();
//! state.wait_for(|s| s.is_playing || s.has_error).await.ok();
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Controller**: `PlaybackController` - a handle to a single task that
//!   owns all playback state
//! - **Media seam**: `MediaService` / `MediaSession` - supplied by the host
//!   platform to open and drive audio sessions
//! - **Observation**: `PlayerSnapshot` via a watch channel, `PlayerEvent` via
//!   broadcast

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Public modules
/// Error types
pub mod error;
/// State management
pub mod state;
/// Core types
pub mod types;

/// Testing utilities
pub mod testing;

pub mod control;
pub mod media;
pub mod preferences;

// Re-exports
pub use control::{PlaybackController, Volume, VolumeLevel, VolumeState};
pub use error::{PlayerError, StorageError};
pub use media::{MediaService, MediaSession, OpenOptions, SessionStatus, StatusSink};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeController, ThemeMode,
};
pub use state::{EventFilter, PlayerEvent, PlayerSnapshot, PrimaryAction};
pub use types::{AudioMode, EndpointList, PlaybackState, PlayerConfig, PlayerConfigBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
///
/// Convenient re-exports
pub mod prelude {
    pub use crate::{
        MediaService, MediaSession, PlaybackController, PlaybackState, PlayerConfig, PlayerError,
        PlayerEvent, PlayerSnapshot, SessionStatus, ThemeController, ThemeMode, Volume,
    };
}
