use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "spendboard.log";

/// Route tracing output to a log file in the data directory. The TUI owns
/// stdout, so nothing is written to the terminal.
///
/// `RUST_LOG` takes precedence over the configured level.
pub(crate) fn init(data_dir: &Path, level: &str) -> Result<()> {
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("spendboard={level}")))
        .context("Invalid log level")?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    tracing::debug!(log = %path.display(), "logging initialised");
    Ok(())
}
