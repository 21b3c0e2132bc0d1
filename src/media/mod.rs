//! Media playback service abstraction
//!
//! The controller never decodes audio or speaks a network protocol itself.
//! A host platform supplies a [`MediaService`] that opens stream URIs and
//! hands back a [`MediaSession`]; asynchronous status from the session is
//! pushed back through the [`StatusSink`] given at open time.

mod traits;


pub use traits::{MediaService, MediaSession, OpenOptions, SessionStatus, StatusSink};
