//! Code snippet command.

use std::path::PathBuf;

use clap::Args;

use teamconnect_client::NewSnippet;
use teamconnect_core::error::AppError;
use teamconnect_ui::CodePreview;

use crate::output;

/// Arguments for the snippet command
#[derive(Debug, Args)]
pub struct SnippetArgs {
    /// Snippet title
    pub title: String,

    /// File holding the code
    #[arg(short = 'i', long)]
    pub file: PathBuf,

    /// Highlighting language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Show the code and ask before posting
    #[arg(short, long)]
    pub preview: bool,
}

/// Execute the snippet command
pub async fn execute(args: &SnippetArgs, config_path: &str) -> Result<(), AppError> {
    let code = tokio::fs::read_to_string(&args.file).await.map_err(|e| {
        AppError::not_found(format!("Cannot read '{}': {e}", args.file.display()))
    })?;
    let snippet = NewSnippet::new(&args.title, code, args.language.as_deref());

    if args.preview {
        let mut preview = CodePreview::new(&snippet.code, &snippet.language);
        preview.show();
        if let (Some(class), Some(text)) = (preview.rendered_class(), preview.rendered_text()) {
            println!("--- {} ({class}) ---", snippet.title);
            println!("{text}");
            println!("---");
        }
        if !super::confirm("Post this snippet?", false)? {
            output::print_warning("Cancelled");
            return Ok(());
        }
    }

    let client = super::connect(config_path)?;
    client.post_snippet(&snippet).await?;
    output::print_success(&format!(
        "Snippet '{}' shared ({})",
        snippet.title, snippet.language
    ));
    Ok(())
}
