use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::{Level, info};
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Maps the number of `-v` flags to a log level, starting at warnings.
pub(crate) fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Sends log events to `log_file`.
///
/// The terminal is owned by the UI while playing, so without a file nothing
/// is logged.
pub(crate) fn init(log_file: Option<&Path>, verbose: u8) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = level_from_verbosity(verbose);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .try_init()
        .context("failed to install the log subscriber")?;

    info!("Logging initialized at level: {}", level);
    Ok(())
}
