// dirwatcher - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Errors are grouped by the scope they are recovered at: startup errors end
// the process, directory errors skip one iteration, file errors skip one file.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Startup errors: anything that prevents the poll loop from being entered.
///
/// Once the loop is running, failures are recovered at narrower scopes
/// (`DirectoryAccessError` per iteration, `FileAccessError` per file) and
/// never reach this type.
#[derive(Debug)]
pub enum DirWatchError {
    /// Startup configuration was rejected.
    Config(ConfigError),

    /// A shutdown signal handler could not be registered.
    SignalHandler { signal: i32, source: io::Error },
}

impl fmt::Display for DirWatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::SignalHandler { signal, source } => {
                write!(f, "Cannot install handler for signal {signal}: {source}")
            }
        }
    }
}

impl std::error::Error for DirWatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::SignalHandler { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Directory errors
// ---------------------------------------------------------------------------

/// The watched directory could not be listed this iteration.
#[derive(Debug)]
pub enum DirectoryAccessError {
    /// The directory does not exist.
    NotFound { path: PathBuf },

    /// The path exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// The directory exists but cannot be read.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Any other I/O failure while listing.
    Io { path: PathBuf, source: io::Error },
}

impl DirectoryAccessError {
    /// Classify an `io::Error` raised while accessing `path`.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Path of the directory that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

impl fmt::Display for DirectoryAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied listing '{}': {source}",
                    path.display()
                )
            }
            Self::Io { path, source } => {
                write!(f, "Cannot list '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DirectoryAccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// File errors
// ---------------------------------------------------------------------------

/// A single tracked file vanished or became unreadable between listing and scan.
#[derive(Debug)]
pub enum FileAccessError {
    /// The file no longer exists.
    NotFound { path: PathBuf },

    /// The file exists but cannot be opened for reading.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Any other I/O failure while opening or reading.
    Io { path: PathBuf, source: io::Error },
}

impl FileAccessError {
    /// Classify an `io::Error` raised while reading `path`.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }
}

impl fmt::Display for FileAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "'{}' no longer exists", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(f, "Permission denied reading '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FileAccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to validating the parsed command line.
#[derive(Debug)]
pub enum ConfigError {
    /// A value is out of the allowed range.
    ValueOutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "'{field}' = '{value}' is out of range. Expected: {expected}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DirWatchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for dirwatcher results.
pub type Result<T> = std::result::Result<T, DirWatchError>;
