// dirwatcher - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Signal handler installation
// 4. Running the poll loop until SIGINT/SIGTERM

use clap::Parser;
use dirwatcher::app::poll_loop::PollLoop;
use dirwatcher::app::signal::{self, CancellationFlag};
use dirwatcher::core::model::WatchConfig;
use dirwatcher::util;
use dirwatcher::util::constants::{
    DEFAULT_EXTENSION, DEFAULT_POLL_INTERVAL_SECS, EXIT_OK, EXIT_STARTUP_FAILURE,
};
use dirwatcher::util::error::Result;
use std::path::PathBuf;

/// Watches a directory of text files for a magic string.
#[derive(Parser, Debug)]
#[command(name = "dirwatcher", version, about)]
struct Cli {
    /// Directory to watch.
    path: PathBuf,

    /// String to watch for.
    magic: String,

    /// Text file extension to watch, e.g. .txt, .log
    #[arg(short = 'e', long = "ext", default_value = DEFAULT_EXTENSION)]
    ext: String,

    /// Number of seconds between polling (truncated to whole seconds).
    #[arg(
        short = 'i',
        long = "interval",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        allow_negative_numbers = true
    )]
    interval: f64,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Validate the arguments and register the shutdown signals.
fn start(cli: Cli) -> Result<PollLoop> {
    let config = WatchConfig::new(cli.path, cli.magic, cli.ext, cli.interval)?;
    let cancel = CancellationFlag::new();
    signal::install(&cancel)?;
    Ok(PollLoop::new(config, cancel))
}

fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    let mut poll = match start(cli) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            std::process::exit(EXIT_STARTUP_FAILURE);
        }
    };

    let summary = poll.run();

    tracing::debug!(
        started_at = %summary.started_at.to_rfc3339(),
        iterations = summary.iterations,
        "Shutdown complete"
    );
    std::process::exit(EXIT_OK);
}
