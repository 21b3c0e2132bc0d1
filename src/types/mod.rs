//! Core types

mod config;
mod endpoint;
mod state;


pub use config::{AudioMode, PlayerConfig, PlayerConfigBuilder};
pub use endpoint::{DEFAULT_ENDPOINTS, EndpointList};
pub use state::PlaybackState;
