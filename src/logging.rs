//! Log file setup
//!
//! The terminal is owned by the dashboard, so log output goes to a file.
//! `RUST_LOG` overrides the default filter.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "skycast=info";

/// File name used inside the data directory
const LOG_FILE: &str = "skycast.log";

/// Chooses where logs go: an explicit path wins over the data directory
pub fn log_path(explicit: Option<&Path>, data_dir: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| data_dir.map(|dir| dir.join(LOG_FILE)))
}

/// Builds the filter from `RUST_LOG`, falling back to `DEFAULT_FILTER`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber, appending to `path`
///
/// Calling this twice leaves the first subscriber in place.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    tracing::info!(path = %path.display(), "skycast logging initialized");
    Ok(())
}
