//! prmonitor CLI entrypoint for stale pull request audits.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Utc;
use ortho_config::OrthoConfig;
use prmonitor::{MonitorConfig, MonitorError};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), MonitorError> {
    let config = load_config()?;
    let today = Utc::now().date_naive();

    let outcome = cli::audit::run(&config, today).await?;

    let mut stdout = io::stdout().lock();
    cli::output::write_audit_summary(&mut stdout, &outcome)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`MonitorError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<MonitorConfig, MonitorError> {
    MonitorConfig::load().map_err(|error| MonitorError::Configuration {
        message: error.to_string(),
    })
}

/// Logs to stderr, filtered by `RUST_LOG` and defaulting to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
