//! File upload command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use teamconnect_core::error::AppError;
use teamconnect_core::types::format_file_size;
use teamconnect_ui::UploadStager;

use crate::output::{self, OutputFormat};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Uploaded file row for table output
#[derive(Debug, Serialize, Tabled)]
struct UploadRow {
    /// File name
    #[tabled(rename = "File")]
    file_name: String,
    /// Human-readable size
    #[tabled(rename = "Size")]
    size: String,
    /// Raw size
    #[tabled(rename = "Bytes")]
    size_bytes: u64,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut stager = UploadStager::new();
    let staged = stager.select(&args.file)?.clone();

    output::print_kv("File", &staged.name);
    output::print_kv("Size", &staged.display_size());

    if !super::confirm(&format!("Upload '{}'?", staged.name), args.yes)? {
        stager.clear();
        output::print_warning("Cancelled");
        return Ok(());
    }

    let client = super::connect(config_path)?;
    let receipt = client.upload_file(&staged.path).await?;

    output::print_row(
        &UploadRow {
            size: format_file_size(receipt.size_bytes),
            file_name: receipt.file_name,
            size_bytes: receipt.size_bytes,
        },
        format,
    );
    output::print_success("File uploaded successfully");
    Ok(())
}
