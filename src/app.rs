//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use ddns_sync::config::ConfigError;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - manifest check failure, runtime setup failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { .. } | ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'ddns-sync init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Two layers share the registry: the console shows INFO and up (DEBUG
/// with `--verbose`, overridable through `RUST_LOG`), while `log_file`
/// collects WARN and up without ANSI colors so drifted records and failed
/// updates survive the terminal session.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened for appending.
pub fn setup_tracing(verbose: bool, log_file: &Path) -> Result<(), std::io::Error> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let console = fmt::layer().with_target(false).with_filter(console_filter);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let warnings = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(console)
        .with(warnings)
        .init();

    Ok(())
}
