//! Playback control module

mod fallback;
pub mod playback;
pub mod volume;


pub(crate) use playback::Command;
pub use playback::PlaybackController;
pub use volume::{Volume, VolumeLevel, VolumeState};
