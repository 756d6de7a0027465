//! Shared domain types used across all TeamConnect crates.

pub mod id;
pub mod size;
pub mod time;

pub use id::{FileId, MessageId, SnippetId};
pub use size::format_file_size;
pub use time::{format_relative, format_timestamp};
