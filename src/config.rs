use crate::persistence::get_data_dir;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `TASKPAD_LOG=debug`)
pub const LOG_ENV: &str = "TASKPAD_LOG";

/// Log file name inside the data directory
pub const LOG_FILE: &str = "taskpad.log";

/// Runtime settings resolved from the command line and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub reminder_interval: Duration,
}

impl Settings {
    /// An explicit directory wins; otherwise look for .taskpad as usual
    pub fn resolve(dir: Option<PathBuf>, reminder_secs: u64) -> Result<Self> {
        let data_dir = match dir {
            Some(dir) => dir,
            None => get_data_dir()?,
        };

        Ok(Self {
            data_dir,
            reminder_interval: Duration::from_secs(reminder_secs.max(1)),
        })
    }
}

/// Initialize logging to `<data_dir>/taskpad.log`.
///
/// The terminal belongs to the UI, so nothing is logged to stdout/stderr.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(settings: &Settings) -> Result<WorkerGuard> {
    crate::persistence::ensure_dir(&settings.data_dir)?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(&settings.data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();

    Ok(guard)
}
