use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::{Error, Result};

/// Initialize logging with structured JSON output
pub fn init_logging() {
    if let Err(e) = try_init_logging(LogFormat::Json) {
        eprintln!("{}", e);
    }
}

/// Initialize logging with pretty output for development
pub fn init_logging_pretty() {
    if let Err(e) = try_init_logging(LogFormat::Pretty) {
        eprintln!("{}", e);
    }
}

/// Install the global subscriber, failing if one is already set
pub fn try_init_logging(format: LogFormat) -> Result<()> {
    // RUST_LOG wins when present
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,proximity=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init(),
    };

    installed.map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(format = ?format, "Logging initialized");
    Ok(())
}
