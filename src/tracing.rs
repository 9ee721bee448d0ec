//! Logging setup for hosts and the demo binary
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=localshortcut=debug` - scope lifecycle transitions
//! - `RUST_LOG=localshortcut=trace` - every dispatched key event
//! - `RUST_LOG=localshortcut::diagnostics=off` - silence accelerator warnings
//!
//! Logs are also written to `~/.config/localshortcut/logs/localshortcut.log`
//! with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// `default_filter` applies when RUST_LOG is unset.
pub fn init(default_filter: &str) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "localshortcut.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
