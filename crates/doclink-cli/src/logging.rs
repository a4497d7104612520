//! Logging setup for the doclink binary
//!
//! Installs a `tracing` subscriber driven by [`LoggingOptions`]. The
//! `RUST_LOG` environment variable takes precedence over the configured
//! level.

use std::io::IsTerminal;

use doclink_core::{LogFormat, LoggingOptions};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with the given options.
///
/// Does nothing when logging is disabled. Fails if a global subscriber is
/// already installed.
pub fn init(options: &LoggingOptions) -> anyhow::Result<()> {
    if !options.enabled {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(options)));

    let layer = match options.format {
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Simple => fmt::layer()
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
            .compact()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(
        level = options.level.as_str(),
        format = ?options.format,
        "logging initialized"
    );
    Ok(())
}

/// Filter directive for the configured level.
///
/// The MongoDB driver's own events are capped at `warn`.
fn default_filter(options: &LoggingOptions) -> String {
    format!("{},mongodb=warn", options.level.as_str())
}
