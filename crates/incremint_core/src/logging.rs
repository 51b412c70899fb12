use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::QuoteConfig;

/// Default filter directives for the given base level.
fn default_filter(level: &str) -> String {
    format!("{level},incremint_app=debug,incremint_docs=debug,incremint_integrations=debug")
}

/// Initializes logging with a daily-rotated file under `~/.incremint/logs/`
/// plus compact stderr output. `RUST_LOG` overrides `log_level`.
/// Returns a guard that must be kept alive for the duration of the process.
pub fn init_logging(log_level: &str) -> Result<WorkerGuard> {
    let logs_dir = QuoteConfig::logs_dir()?;
    init_logging_to_dir(&logs_dir, &default_filter(log_level))
}

fn init_logging_to_dir(logs_dir: &Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "incremint");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}
