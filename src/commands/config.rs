//! Configuration management commands.

use clap::{Args, Subcommand};

use brainbox_core::config::AppConfig;
use brainbox_core::config::session::TokenStoreKind;
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
    /// Validate the merged configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_item(config, format),
            OutputFormat::Table => {
                output::print_kv("api.base_url", &config.api.base_url);
                output::print_kv(
                    "api.request_timeout_seconds",
                    &config.api.request_timeout_seconds.to_string(),
                );
                output::print_kv("api.user_agent", &config.api.user_agent);
                output::print_kv("session.token_store", store_name(config.session.token_store));
                output::print_kv("session.token_file", &config.session.token_file);
                output::print_kv("logging.level", &config.logging.level);
                output::print_kv("logging.format", &config.logging.format);
            }
        },
        ConfigCommand::Validate => match validate(config) {
            Ok(()) => {
                output::print_success("Configuration is valid");
                println!("  Backend: {}", config.api.base_url);
                println!("  Token store: {}", store_name(config.session.token_store));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e.message));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn store_name(kind: TokenStoreKind) -> &'static str {
    match kind {
        TokenStoreKind::File => "file",
        TokenStoreKind::Memory => "memory",
    }
}

/// Check the settings the console cannot run without.
fn validate(config: &AppConfig) -> AppResult<()> {
    brainbox_client::client::parse_base_url(&config.api.base_url)?;
    if config.api.request_timeout_seconds == 0 {
        return Err(AppError::configuration(
            "api.request_timeout_seconds must be at least 1",
        ));
    }
    if config.session.token_store == TokenStoreKind::File
        && config.session.token_file.trim().is_empty()
    {
        return Err(AppError::configuration(
            "session.token_file is required for the file token store",
        ));
    }
    if !matches!(config.logging.format.as_str(), "pretty" | "json") {
        return Err(AppError::configuration(format!(
            "logging.format must be 'pretty' or 'json', got '{}'",
            config.logging.format
        )));
    }
    Ok(())
}
