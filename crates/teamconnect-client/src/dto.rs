//! Request and response payloads exchanged with the server.

use serde::{Deserialize, Serialize};

/// Body of `DELETE /file/{id}` and `DELETE /snippet/{id}`.
///
/// Success answers `{"success": true}`; failures answer `{"error": "..."}`
/// without a `success` field, so it defaults to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether the resource was removed.
    #[serde(default)]
    pub success: bool,
    /// Server-supplied failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteResponse {
    /// The failure reason to show a user.
    pub fn error_message(&self) -> &str {
        self.error
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("Unknown error")
    }
}

/// A code snippet to post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSnippet {
    /// Snippet title.
    pub title: String,
    /// Source code.
    pub code: String,
    /// Highlighting language (`text` when unknown).
    #[serde(default = "default_language")]
    pub language: String,
}

impl NewSnippet {
    /// Build a snippet; an empty language becomes `text`.
    pub fn new(title: impl Into<String>, code: impl Into<String>, language: Option<&str>) -> Self {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(default_language);
        Self {
            title: title.into(),
            code: code.into(),
            language,
        }
    }
}

fn default_language() -> String {
    "text".to_string()
}

/// What the client knows after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    /// File name sent to the server.
    pub file_name: String,
    /// Bytes sent.
    pub size_bytes: u64,
}

/// Result of one dashboard fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardFetch {
    /// Final HTTP status after redirects.
    pub status: u16,
    /// Wall-clock time of the fetch.
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}
