//! Theme preference commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use teamconnect_core::error::AppError;
use teamconnect_ui::{JsonPreferenceStore, Theme, ThemeManager};

use crate::output::{self, OutputFormat};

/// Arguments for theme commands
#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Theme subcommand
    #[command(subcommand)]
    pub command: ThemeCommand,
}

/// Theme subcommands
#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Show the saved theme
    Show,
    /// Save a theme
    Set {
        /// `light` or `dark`
        theme: Theme,
    },
    /// Switch between light and dark
    Toggle,
}

/// Theme display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ThemeRow {
    /// Theme in effect
    #[tabled(rename = "Theme")]
    theme: String,
    /// Toggle button icon
    #[tabled(rename = "Toggle Icon")]
    icon: String,
    /// Preference file
    #[tabled(rename = "Stored In")]
    store: String,
}

/// Execute theme commands
pub fn execute(args: &ThemeArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store = JsonPreferenceStore::open(&config.preferences.path)?;
    let mut manager = ThemeManager::load(store)?;

    match &args.command {
        ThemeCommand::Show => {}
        ThemeCommand::Set { theme } => manager.set_theme(*theme)?,
        ThemeCommand::Toggle => {
            manager.toggle_theme()?;
        }
    }

    let row = ThemeRow {
        theme: manager.theme().to_string(),
        icon: manager.toggle_icon().to_string(),
        store: config.preferences.path.clone(),
    };
    output::print_row(&row, format);
    Ok(())
}
