// dirwatcher - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across the core and app layers.

use crate::util::error::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// Watch configuration
// =============================================================================

/// Parsed, validated watch settings. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    path: PathBuf,
    magic: String,
    ext: String,
    interval_secs: f64,
    sleep: Duration,
}

impl WatchConfig {
    /// Validate and build a configuration.
    ///
    /// The interval must be finite and non-negative, and its whole-second part
    /// must fit in a `Duration`. The extension must be non-empty. An empty
    /// `magic` is accepted and matches every line.
    pub fn new(
        path: impl Into<PathBuf>,
        magic: impl Into<String>,
        ext: impl Into<String>,
        interval_secs: f64,
    ) -> Result<Self, ConfigError> {
        let ext = ext.into();
        if ext.is_empty() {
            return Err(ConfigError::ValueOutOfRange {
                field: "ext",
                value: ext,
                expected: "a non-empty file-name suffix such as .txt",
            });
        }
        let sleep = if interval_secs < 0.0 {
            None
        } else {
            Duration::try_from_secs_f64(interval_secs.trunc()).ok()
        };
        let Some(sleep) = sleep else {
            return Err(ConfigError::ValueOutOfRange {
                field: "interval",
                value: interval_secs.to_string(),
                expected: "a finite, non-negative number of seconds",
            });
        };
        Ok(Self {
            path: path.into(),
            magic: magic.into(),
            ext,
            interval_secs,
            sleep,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn magic(&self) -> &str {
        &self.magic
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Sleep between polls: the interval truncated to whole seconds.
    pub fn sleep_duration(&self) -> Duration {
        self.sleep
    }
}

// =============================================================================
// Scan output
// =============================================================================

/// A line that contains the magic string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number within the file.
    pub line_number: u64,
}

/// Result of scanning one file from a remembered offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Lines processed so far. Never less than the offset the scan started from.
    pub new_offset: u64,
    /// Matches at or after the start offset, in file order.
    pub matches: Vec<LineMatch>,
}

// =============================================================================
// Reconciliation output
// =============================================================================

/// Files that appeared in or disappeared from the watched directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Newly tracked names, in listing order.
    pub added: Vec<String>,
    /// Names dropped from tracking, in tracking (insertion) order.
    pub removed: Vec<String>,
}

impl ReconcileOutcome {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::{DEFAULT_EXTENSION, DEFAULT_POLL_INTERVAL_SECS};

    #[test]
    fn test_config_defaults() {
        let cfg = WatchConfig::new(
            "/tmp/w",
            "MAGIC",
            DEFAULT_EXTENSION,
            DEFAULT_POLL_INTERVAL_SECS,
        )
        .unwrap();
        assert_eq!(cfg.ext(), ".txt");
        assert_eq!(cfg.interval_secs(), 2.0);
        assert_eq!(cfg.sleep_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_interval_truncated_to_whole_seconds() {
        let cfg = WatchConfig::new("/tmp/w", "m", ".log", 2.9).unwrap();
        assert_eq!(cfg.sleep_duration(), Duration::from_secs(2));

        let cfg = WatchConfig::new("/tmp/w", "m", ".log", 0.5).unwrap();
        assert_eq!(cfg.sleep_duration(), Duration::ZERO);
    }

    #[test]
    fn test_rejects_bad_interval() {
        for bad in [-1.0, -0.5, f64::NAN, f64::INFINITY, 1e30] {
            let result = WatchConfig::new("/tmp/w", "m", ".txt", bad);
            assert!(
                matches!(
                    result,
                    Err(ConfigError::ValueOutOfRange {
                        field: "interval",
                        ..
                    })
                ),
                "interval {bad} must be rejected"
            );
        }
    }

    #[test]
    fn test_long_intervals_are_accepted() {
        let cfg = WatchConfig::new("/tmp/w", "m", ".txt", 172_800.7).unwrap();
        assert_eq!(cfg.sleep_duration(), Duration::from_secs(172_800));
    }

    #[test]
    fn test_rejects_empty_extension() {
        let result = WatchConfig::new("/tmp/w", "m", "", 2.0);
        assert!(matches!(
            result,
            Err(ConfigError::ValueOutOfRange { field: "ext", .. })
        ));
    }

    #[test]
    fn test_empty_magic_is_allowed() {
        assert!(WatchConfig::new("/tmp/w", "", ".txt", 1.0).is_ok());
    }
}
