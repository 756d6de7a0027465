//! Configuration management commands.

use clap::{Args, Subcommand};

use teamconnect_core::config::AppConfig;
use teamconnect_core::error::AppError;

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
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = masked(super::load_config(config_path)?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => print_summary(&config),
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                print_summary(&masked(config));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn print_summary(config: &AppConfig) {
    output::print_kv("Server", &config.server.base_url);
    output::print_kv(
        "Session cookie",
        config.server.session_cookie.as_deref().unwrap_or("(none)"),
    );
    output::print_kv(
        "Request timeout",
        &format!("{}s", config.server.request_timeout_seconds),
    );
    output::print_kv("Dashboard path", &config.refresh.dashboard_path);
    output::print_kv(
        "Refresh interval",
        &format!("{}ms", config.refresh.refresh_interval_ms),
    );
    output::print_kv(
        "Activity poll",
        &format!("{}ms", config.refresh.activity_poll_interval_ms),
    );
    output::print_kv(
        "Inactivity threshold",
        &format!("{}ms", config.refresh.inactivity_threshold_ms),
    );
    output::print_kv("Preferences", &config.preferences.path);
    output::print_kv(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
}

/// Hide the session cookie before printing.
fn masked(mut config: AppConfig) -> AppConfig {
    config.server.session_cookie = config.server.session_cookie.map(|_| "****".to_string());
    config
}
