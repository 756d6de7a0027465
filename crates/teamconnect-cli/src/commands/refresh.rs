//! One-shot dashboard fetch.

use serde::Serialize;
use tabled::Tabled;

use teamconnect_core::error::AppError;
use teamconnect_core::types::format_relative;

use crate::output::{self, OutputFormat};

/// Fetch result row for table output
#[derive(Debug, Serialize, Tabled)]
struct RefreshRow {
    /// Server URL
    #[tabled(rename = "Server")]
    server: String,
    /// HTTP status
    #[tabled(rename = "Status")]
    status: u16,
    /// When the fetch happened
    #[tabled(rename = "Fetched")]
    fetched: String,
}

/// Execute the refresh command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let client = super::connect(config_path)?;
    let fetch = client.fetch_dashboard().await?;

    let now = chrono::Utc::now();
    output::print_row(
        &RefreshRow {
            server: client.base_url().to_string(),
            status: fetch.status,
            fetched: format_relative(&fetch.fetched_at, &now),
        },
        format,
    );
    Ok(())
}
