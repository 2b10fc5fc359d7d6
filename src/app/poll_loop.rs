// dirwatcher - app/poll_loop.rs
//
// The watch loop: list → reconcile → scan every tracked file → sleep.
//
// Architecture:
//   - `PollLoop` owns the `WatchState` and the configuration outright; nothing
//     else mutates them, so no locking is needed.
//   - The only shared value is the `CancellationFlag`, written by the signal
//     handler thread and read here once at the top of each iteration. An
//     in-flight iteration always runs to completion.
//   - The sleep is a single uninterrupted `thread::sleep`; a signal that
//     arrives mid-sleep is observed once the sleep ends.
//
// Error policy (no error ever ends the loop):
//   - DirectoryAccessError: logged at ERROR, rest of the iteration skipped,
//     tracked state left untouched.
//   - FileAccessError: logged at WARN, only that file skipped; its offset is
//     kept for the next poll.
//   Reconciliation and offset bookkeeping are infallible, so these two scopes
//   cover every failure an iteration can produce.

use crate::app::signal::CancellationFlag;
use crate::core::listing::list_directory;
use crate::core::model::WatchConfig;
use crate::core::scanner;
use crate::core::watch_state::WatchState;
use crate::util::constants::{APP_NAME, APP_VERSION, BANNER_RULE};
use crate::util::error::DirectoryAccessError;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

// =============================================================================
// Public types
// =============================================================================

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Polling; entered once signal handlers are installed.
    Running,
    /// Cancel flag observed; no further iterations will start.
    Cancelling,
    /// Terminal.
    Stopped,
}

/// A magic-string hit reported during one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    pub file: String,
    /// 1-based line number.
    pub line_number: u64,
}

/// Everything one iteration observed. Returned for callers and tests; the
/// same facts are also logged as they happen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub matches: Vec<FileMatch>,
    /// Names of tracked files that could not be scanned this time.
    pub file_errors: Vec<String>,
    /// The directory could not be listed; nothing else was attempted.
    pub directory_error: bool,
}

/// Final numbers logged at shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownSummary {
    pub started_at: DateTime<Local>,
    pub uptime: Duration,
    pub iterations: u64,
}

// =============================================================================
// PollLoop
// =============================================================================

pub struct PollLoop {
    config: WatchConfig,
    state: WatchState,
    cancel: CancellationFlag,
    lifecycle: LoopState,
    iterations: u64,
}

impl PollLoop {
    pub fn new(config: WatchConfig, cancel: CancellationFlag) -> Self {
        Self {
            config,
            state: WatchState::new(),
            cancel,
            lifecycle: LoopState::Running,
            iterations: 0,
        }
    }

    pub fn watch_state(&self) -> &WatchState {
        &self.state
    }

    pub fn lifecycle(&self) -> LoopState {
        self.lifecycle
    }

    /// Number of iterations run so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Poll until the cancel flag is set, then return the shutdown summary.
    ///
    /// Logs a start banner on entry and an uptime banner on exit.
    pub fn run(&mut self) -> ShutdownSummary {
        let started_at = Local::now();
        let clock = Instant::now();

        tracing::info!(
            "\n{BANNER_RULE}\n    Running {APP_NAME} {APP_VERSION}\n    Started on {}\n{BANNER_RULE}",
            started_at.to_rfc3339()
        );
        tracing::info!(
            path = %self.config.path().display(),
            magic = self.config.magic(),
            ext = self.config.ext(),
            interval_secs = self.config.interval_secs(),
            "Watching directory"
        );

        while self.lifecycle == LoopState::Running {
            if self.cancel.is_cancelled() {
                tracing::debug!("Cancel flag set; stopping poll loop");
                self.lifecycle = LoopState::Cancelling;
                break;
            }
            self.run_iteration();
            std::thread::sleep(self.config.sleep_duration());
        }

        self.lifecycle = LoopState::Stopped;
        let summary = ShutdownSummary {
            started_at,
            uptime: clock.elapsed(),
            iterations: self.iterations,
        };
        tracing::info!(
            iterations = summary.iterations,
            "\n{BANNER_RULE}\n    Stopped {APP_NAME}\n    Uptime was {}\n{BANNER_RULE}",
            format_uptime(summary.uptime)
        );
        summary
    }

    /// Run a single poll iteration without sleeping.
    ///
    /// Never fails: every error is logged and reflected in the report.
    pub fn run_iteration(&mut self) -> IterationReport {
        self.iterations += 1;
        let mut report = IterationReport::default();

        if let Err(e) = self.poll_once(&mut report) {
            tracing::error!(
                path = %e.path().display(),
                error = %e,
                "Directory does not exist or cannot be read"
            );
            report.directory_error = true;
        }

        report
    }

    fn poll_once(&mut self, report: &mut IterationReport) -> Result<(), DirectoryAccessError> {
        let listing = list_directory(self.config.path())?;

        let outcome = self.state.reconcile(&listing, self.config.ext());
        for name in &outcome.added {
            tracing::info!(file = %name, "New file was added");
        }
        for name in &outcome.removed {
            tracing::info!(file = %name, "A file was removed");
        }
        report.added = outcome.added;
        report.removed = outcome.removed;

        for name in self.state.tracked_names() {
            let offset = self.state.offset(&name).unwrap_or(0);
            let path = self.config.path().join(&name);

            let result = match scanner::scan(&path, offset, self.config.magic()) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Cannot scan file; skipping");
                    report.file_errors.push(name);
                    continue;
                }
            };

            for m in &result.matches {
                tracing::info!(
                    file = %name,
                    line = m.line_number,
                    "{} found on line {}",
                    self.config.magic(),
                    m.line_number
                );
                report.matches.push(FileMatch {
                    file: name.clone(),
                    line_number: m.line_number,
                });
            }

            if result.new_offset != offset {
                tracing::debug!(file = %name, from = offset, to = result.new_offset, "Offset advanced");
            }
            self.state.set_offset(&name, result.new_offset);
        }

        Ok(())
    }
}

/// Render an uptime as `H:MM:SS.mmm`.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    format!(
        "{}:{:02}:{:02}.{:03}",
        total / 3600,
        (total / 60) % 60,
        total % 60,
        uptime.subsec_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_loop(dir: &std::path::Path) -> PollLoop {
        let config = WatchConfig::new(dir, "MAGIC", ".txt", 0.0).expect("config");
        PollLoop::new(config, CancellationFlag::new())
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_millis(0)), "0:00:00.000");
        assert_eq!(format_uptime(Duration::from_millis(3_723_045)), "1:02:03.045");
    }

    #[test]
    fn test_iteration_counts_and_stays_running() {
        let dir = TempDir::new().expect("tmpdir");
        let mut poll = make_loop(dir.path());
        poll.run_iteration();
        poll.run_iteration();
        assert_eq!(poll.iterations(), 2);
        assert_eq!(poll.lifecycle(), LoopState::Running);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_skipped_others_still_scanned() {
        let dir = TempDir::new().expect("tmpdir");
        fs::write(dir.path().join("good.txt"), "MAGIC\n").expect("write");
        // Listed (not a directory) but cannot be opened.
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling.txt"))
            .expect("symlink");
        let mut poll = make_loop(dir.path());

        let report = poll.run_iteration();
        assert_eq!(
            report.added,
            vec!["dangling.txt".to_string(), "good.txt".to_string()]
        );
        assert_eq!(report.file_errors, vec!["dangling.txt".to_string()]);
        assert_eq!(
            report.matches,
            vec![FileMatch {
                file: "good.txt".to_string(),
                line_number: 1
            }]
        );
        assert_eq!(poll.watch_state().offset("dangling.txt"), Some(0));
        assert_eq!(poll.watch_state().offset("good.txt"), Some(1));

        // The failing file stays tracked and is retried next poll.
        let report = poll.run_iteration();
        assert!(report.removed.is_empty());
        assert_eq!(report.file_errors, vec!["dangling.txt".to_string()]);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_cancelled_before_start_runs_no_iterations() {
        let dir = TempDir::new().expect("tmpdir");
        let mut poll = make_loop(dir.path());
        poll.cancel.cancel();
        let summary = poll.run();
        assert_eq!(summary.iterations, 0);
        assert_eq!(poll.lifecycle(), LoopState::Stopped);
    }
}
