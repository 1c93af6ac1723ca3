//! BrainBox Console — administrative command line for the BrainBox backend
//!
//! Main entry point that loads configuration, restores the stored session
//! and dispatches the requested command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use brainbox_core::config::AppConfig;
use brainbox_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config_dir) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e.message));
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli, config).await {
        tracing::debug!(kind = %e.kind, error = %e, "Command failed");
        output::print_app_error(&e);
        std::process::exit(1);
    }
}

/// Load configuration from the config directory and environment
fn load_configuration(config_dir: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("BRAINBOX_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(config_dir, &env)
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// machine-readable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Dispatch the parsed command
async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting BrainBox console");

    cli.execute(config).await
}
