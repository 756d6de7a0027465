//! Delete commands for uploaded files and code snippets.

use clap::{Args, Subcommand};

use teamconnect_core::error::AppError;
use teamconnect_core::types::{FileId, SnippetId};

use crate::output;

/// Arguments for delete commands
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// What to delete
    #[command(subcommand)]
    pub target: DeleteTarget,

    /// Skip the confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,
}

/// Delete targets
#[derive(Debug, Subcommand)]
pub enum DeleteTarget {
    /// Delete an uploaded file
    File {
        /// File id
        id: FileId,
    },
    /// Delete a code snippet
    Snippet {
        /// Snippet id
        id: SnippetId,
    },
}

impl DeleteTarget {
    fn prompt(&self) -> &'static str {
        match self {
            Self::File { .. } => "Are you sure you want to delete this file?",
            Self::Snippet { .. } => "Are you sure you want to delete this code snippet?",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Snippet { .. } => "snippet",
        }
    }
}

/// Execute delete commands
pub async fn execute(args: &DeleteArgs, config_path: &str) -> Result<(), AppError> {
    if !super::confirm(args.target.prompt(), args.yes)? {
        output::print_warning("Cancelled");
        return Ok(());
    }

    let client = super::connect(config_path)?;
    let noun = args.target.noun();
    let result = match &args.target {
        DeleteTarget::File { id } => client.delete_file(id).await,
        DeleteTarget::Snippet { id } => client.delete_snippet(id).await,
    };

    match result {
        Ok(()) => {
            output::print_success(&format!("Deleted {noun}"));
            Ok(())
        }
        Err(e) if e.is_transport() => Err(AppError::network(format!(
            "Error deleting {noun}. Please try again. ({})",
            e.message
        ))),
        Err(e) => Err(AppError::new(
            e.kind,
            format!("Error deleting {noun}: {}", e.message),
        )),
    }
}
