// Logging setup
//
// Console output plus one log file per run at a fixed path, truncated on
// open so each run overwrites the last. Verbosity is filtered through
// RUST_LOG, defaulting to info.

use std::fs::{self, File};
use std::path::Path;
use std::sync::{Arc, Once};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Fixed per-run log file path, created on demand.
pub const LOG_FILE: &str = "logs/test-run.log";

static INIT: Once = Once::new();

/// Initializes the subscriber once per process.
///
/// Safe to call from every harness launch; later calls are no-ops, as is
/// running under a subscriber some other layer already installed.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let console = fmt::layer().with_target(false).with_writer(std::io::stderr);
        // If the log file cannot be opened the run proceeds console-only.
        let file = open_log_file().ok().map(|file| {
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file))
        });
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file)
            .try_init();
    });
}

fn open_log_file() -> std::io::Result<File> {
    if let Some(parent) = Path::new(LOG_FILE).parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(LOG_FILE)
}
