// dirwatcher - app/signal.rs
//
// Bridges SIGINT/SIGTERM to a cooperative cancel flag.
//
// `signal_hook::flag::register` stores `true` into the shared
// `Arc<AtomicBool>` from inside the handler and does nothing else; all
// logging about the shutdown happens later on the poll loop thread when it
// observes the flag. Only SIGINT and SIGTERM are registered. Every other
// signal keeps its default disposition.

use crate::util::error::DirWatchError;
use signal_hook::consts::{SIGINT, SIGTERM};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Signals that request a graceful shutdown.
pub const SHUTDOWN_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

/// Process-wide shutdown request, shared between the signal handler and the
/// poll loop.
///
/// Starts `false`. Once set it stays set; setting it again is a no-op.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Register SIGINT and SIGTERM to set `flag`.
pub fn install(flag: &CancellationFlag) -> Result<(), DirWatchError> {
    for signal in SHUTDOWN_SIGNALS {
        signal_hook::flag::register(signal, Arc::clone(&flag.0))
            .map_err(|source| DirWatchError::SignalHandler { signal, source })?;
    }
    tracing::debug!(signals = ?SHUTDOWN_SIGNALS, "Signal handlers installed");
    Ok(())
}
