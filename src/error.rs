use std::io;
use thiserror::Error;

/// Preference storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored data could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Store is not reachable
    #[error("storage not available")]
    NotAvailable,
}

/// Errors that can occur while driving stream playback
#[derive(Debug, Error)]
pub enum PlayerError {
    // ===== Endpoint Errors =====
    /// The media service could not open the endpoint
    #[error("failed to open {uri}: {message}")]
    OpenFailed {
        /// The endpoint URI
        uri: String,
        /// Description of the failure
        message: String,
    },

    /// An opened session reported a playback error
    #[error("playback failed on {uri}: {message}")]
    PlaybackFailed {
        /// The endpoint URI
        uri: String,
        /// Description of the failure
        message: String,
    },

    // ===== Session Errors =====
    /// A best-effort control call on the active session failed
    #[error("{operation} failed: {message}")]
    SessionControl {
        /// The control operation (pause, stop, release, set volume)
        operation: &'static str,
        /// Description of the failure
        message: String,
    },

    // ===== Configuration Errors =====
    /// Configuration rejected at construction
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    // ===== Controller Errors =====
    /// The controller task has shut down and no longer accepts commands
    #[error("playback controller is closed")]
    ControllerClosed,

    // ===== Storage Errors =====
    /// Preference storage failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PlayerError {
    /// Check if this error is an endpoint failure the fallback sweep recovers from
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::OpenFailed { .. } | Self::PlaybackFailed { .. })
    }

    /// Shorthand for a session control failure
    pub(crate) fn control(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::SessionControl {
            operation,
            message: err.to_string(),
        }
    }
}

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
