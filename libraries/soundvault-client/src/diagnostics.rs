//! Non-fatal failure channel.
//!
//! Some failures are suppressed on purpose: a malformed success body
//! becomes an absent value, a failed logout notification still logs the
//! user out locally, and a broken stored session is discarded during
//! bootstrap. Each suppression is logged and broadcast here so callers and
//! tests can observe it without it ever reaching the propagated `Result`.

use tokio::sync::broadcast;
use tracing::warn;

const CHANNEL_CAPACITY: usize = 64;

/// A failure that was deliberately not propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonFatal {
    /// A success response claimed JSON but could not be decoded
    MalformedBody { path: String, detail: String },
    /// The server could not be told about a logout
    LogoutNotifyFailed { message: String },
    /// Stored credentials could not be restored and were discarded
    BootstrapFailed { message: String },
}

impl std::fmt::Display for NonFatal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonFatal::MalformedBody { path, detail } => {
                write!(f, "malformed response body from {}: {}", path, detail)
            }
            NonFatal::LogoutNotifyFailed { message } => {
                write!(f, "server logout failed: {}", message)
            }
            NonFatal::BootstrapFailed { message } => {
                write!(f, "session restore failed: {}", message)
            }
        }
    }
}

/// Broadcast sink for [`NonFatal`] events. Cheap to clone; clones share the channel.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    tx: broadcast::Sender<NonFatal>,
}

impl Diagnostics {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Log and broadcast a suppressed failure. Never fails.
    pub fn report(&self, event: NonFatal) {
        warn!(event = %event, "Suppressed non-fatal failure");
        // No subscribers is fine
        let _ = self.tx.send(event);
    }

    /// Receive events reported after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<NonFatal> {
        self.tx.subscribe()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}
