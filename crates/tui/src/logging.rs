use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, error::Result};

/// Sends tracing output to the configured log file, the terminal belongs to the UI.
pub fn init(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "spendlog_tui={level},engine={level}",
            level = config.log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
