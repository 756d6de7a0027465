//! Team message command.

use clap::Args;

use teamconnect_core::error::AppError;

use crate::output;

/// Arguments for the message command
#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Message text
    pub text: String,
}

/// Execute the message command
pub async fn execute(args: &MessageArgs, config_path: &str) -> Result<(), AppError> {
    let client = super::connect(config_path)?;
    client.post_message(&args.text).await?;
    output::print_success("Message posted");
    Ok(())
}
