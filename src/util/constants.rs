// dirwatcher - util/constants.rs
//
// Single source of truth for named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "dirwatcher";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Watch defaults
// =============================================================================

/// File-name suffix a directory entry must end with to be tracked.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Seconds between polls when `--interval` is not given.
pub const DEFAULT_POLL_INTERVAL_SECS: f64 = 2.0;

// =============================================================================
// Exit codes
// =============================================================================

/// Process exit code after a signal-driven shutdown.
pub const EXIT_OK: i32 = 0;

/// Process exit code when startup fails (invalid arguments, no signal handler).
pub const EXIT_STARTUP_FAILURE: i32 = 1;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither `RUST_LOG` nor `--debug` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Horizontal rule used by the startup and shutdown banners.
pub const BANNER_RULE: &str =
    "-----------------------------------------------------------------";
