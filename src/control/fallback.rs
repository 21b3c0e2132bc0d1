//! Cancellable fallback timer

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::playback::Command;

/// A scheduled re-attempt of the next endpoint
///
/// Dropping the timer cancels it. A timer that already fired delivers
/// `Command::FallbackElapsed` tagged with its generation, which the controller
/// checks against the timer it still holds.
#[derive(Debug)]
pub(crate) struct FallbackTimer {
    generation: u64,
    next_index: usize,
    _guard: DropGuard,
}

impl FallbackTimer {
    /// Spawn a timer that wakes the controller after `delay`
    pub(crate) fn schedule(
        delay: Duration,
        generation: u64,
        next_index: usize,
        tx: mpsc::WeakUnboundedSender<Command>,
    ) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {
                    tracing::trace!("Fallback timer {} cancelled", generation);
                }
                () = tokio::time::sleep(delay) => {
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(Command::FallbackElapsed { generation });
                    }
                }
            }
        });

        Self {
            generation,
            next_index,
            _guard: token.drop_guard(),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn next_index(&self) -> usize {
        self.next_index
    }
}
