//! CLI command definitions and dispatch.

pub mod config;
pub mod delete;
pub mod message;
pub mod refresh;
pub mod search;
pub mod snippet;
pub mod theme;
pub mod upload;

use clap::{Parser, Subcommand};

use teamconnect_client::TeamConnectClient;
use teamconnect_core::config::AppConfig;
use teamconnect_core::error::AppError;

use crate::output::OutputFormat;

/// TeamConnect command-line client
#[derive(Debug, Parser)]
#[command(name = "teamconnect", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Delete an uploaded file or a code snippet
    Delete(delete::DeleteArgs),
    /// Upload a file
    Upload(upload::UploadArgs),
    /// Share a code snippet
    Snippet(snippet::SnippetArgs),
    /// Post a team message
    Message(message::MessageArgs),
    /// Show or change the colour theme
    Theme(theme::ThemeArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Fetch the dashboard once
    Refresh,
    /// Search files, snippets and messages in a server data directory
    Search(search::SearchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Delete(args) => delete::execute(args, &self.config).await,
            Commands::Upload(args) => upload::execute(args, &self.config, self.format).await,
            Commands::Snippet(args) => snippet::execute(args, &self.config).await,
            Commands::Message(args) => message::execute(args, &self.config).await,
            Commands::Theme(args) => theme::execute(args, &self.config, self.format),
            Commands::Config(args) => config::execute(args, &self.config, self.format),
            Commands::Refresh => refresh::execute(&self.config, self.format).await,
            Commands::Search(args) => search::execute(args, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build a server client from the configuration file
pub fn connect(config_path: &str) -> Result<TeamConnectClient, AppError> {
    let config = load_config(config_path)?;
    TeamConnectClient::from_config(&config)
}

/// Ask a yes/no question, unless `assume_yes` already answered it.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, AppError> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
