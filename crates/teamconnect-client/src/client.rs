//! TeamConnect server client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};

use teamconnect_core::config::{AppConfig, RefreshConfig, ServerConfig};
use teamconnect_core::error::{AppError, ErrorKind};
use teamconnect_core::result::AppResult;
use teamconnect_core::traits::RefreshSource;
use teamconnect_core::types::{FileId, SnippetId};

use crate::dto::{DashboardFetch, DeleteResponse, NewSnippet, UploadReceipt};
use crate::error::{from_reqwest, from_status, kind_for_status};

/// Name of the session cookie issued by the server at login.
pub const SESSION_COOKIE: &str = "session_id";

/// Path the server redirects to when the session is missing.
const LOGIN_PATH: &str = "/login";

/// HTTP client for one TeamConnect server.
#[derive(Debug, Clone)]
pub struct TeamConnectClient {
    http: reqwest::Client,
    base_url: Url,
    dashboard_path: String,
}

impl TeamConnectClient {
    /// Create a client from server and refresh settings.
    pub fn new(server: &ServerConfig, refresh: &RefreshConfig) -> AppResult<Self> {
        let base_url = Url::parse(&server.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid server URL '{}': {e}", server.base_url))
        })?;

        let mut headers = HeaderMap::new();
        if let Some(session) = server.session_cookie.as_deref().filter(|s| !s.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("{SESSION_COOKIE}={session}"))
                .map_err(|e| AppError::configuration(format!("Invalid session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(header::COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(server.request_timeout_seconds))
            .default_headers(headers)
            .user_agent(concat!("teamconnect-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| from_reqwest("Failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url,
            dashboard_path: refresh.dashboard_path.clone(),
        })
    }

    /// Create a client from the full application config.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.server, &config.refresh)
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::validation(format!("Invalid request path '{path}': {e}")))
    }

    /// Fail when a followed redirect landed on the login page.
    fn ensure_logged_in(response: &Response, context: &str) -> AppResult<()> {
        if response.url().path() == LOGIN_PATH {
            return Err(AppError::authentication(format!(
                "{context}: session expired or missing, log in again"
            )));
        }
        Ok(())
    }

    /// Fetch the dashboard page. Only the status matters; the body is discarded.
    pub async fn fetch_dashboard(&self) -> AppResult<DashboardFetch> {
        let context = "Dashboard refresh";
        let response = self
            .http
            .get(self.url(&self.dashboard_path)?)
            .send()
            .await
            .map_err(|e| from_reqwest(context, e))?;

        Self::ensure_logged_in(&response, context)?;
        let status = response.status();
        if !status.is_success() {
            return Err(from_status(context, status));
        }

        tracing::trace!("Dashboard fetch answered {}", status);
        Ok(DashboardFetch {
            status: status.as_u16(),
            fetched_at: chrono::Utc::now(),
        })
    }

    /// Delete an uploaded file.
    pub async fn delete_file(&self, id: &FileId) -> AppResult<()> {
        self.delete_resource(&format!("/file/{id}"), "file").await
    }

    /// Delete a code snippet.
    pub async fn delete_snippet(&self, id: &SnippetId) -> AppResult<()> {
        self.delete_resource(&format!("/snippet/{id}"), "snippet")
            .await
    }

    async fn delete_resource(&self, path: &str, noun: &str) -> AppResult<()> {
        let context = format!("Delete {noun}");
        let response = self
            .http
            .delete(self.url(path)?)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| from_reqwest(&context, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| from_reqwest(&context, e))?;

        let parsed = match serde_json::from_str::<DeleteResponse>(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => return Err(from_status(&context, status)),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Serialization,
                    format!("{context}: unexpected response body"),
                    e,
                ));
            }
        };

        if parsed.success {
            tracing::info!("Deleted {} via {}", noun, path);
            return Ok(());
        }

        tracing::warn!("Server refused to delete {} {}: {}", noun, path, parsed.error_message());
        Err(AppError::new(
            kind_for_status(status),
            parsed.error_message().to_string(),
        ))
    }

    /// Upload a local file through the upload form.
    pub async fn upload_file(&self, path: &Path) -> AppResult<UploadReceipt> {
        let context = "Upload file";
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("'{}' has no usable file name", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read '{}': {e}", path.display()),
                e,
            )
        })?;
        let size_bytes = content.len() as u64;

        let part = Part::bytes(content).file_name(file_name.clone());
        let form = Form::new().part("file", part);
        self.post_form("/upload", form, context).await?;

        tracing::info!("Uploaded '{}' ({} bytes)", file_name, size_bytes);
        Ok(UploadReceipt {
            file_name,
            size_bytes,
        })
    }

    /// Post a code snippet.
    pub async fn post_snippet(&self, snippet: &NewSnippet) -> AppResult<()> {
        if snippet.title.trim().is_empty() {
            return Err(AppError::validation("Snippet title must not be empty"));
        }
        let form = Form::new()
            .text("title", snippet.title.clone())
            .text("code", snippet.code.clone())
            .text("language", snippet.language.clone());
        self.post_form("/code", form, "Post snippet").await?;
        tracing::info!("Posted snippet '{}' ({})", snippet.title, snippet.language);
        Ok(())
    }

    /// Post a team message.
    pub async fn post_message(&self, message: &str) -> AppResult<()> {
        if message.trim().is_empty() {
            return Err(AppError::validation("Message must not be empty"));
        }
        let form = Form::new().text("message", message.to_string());
        self.post_form("/message", form, "Post message").await?;
        tracing::info!("Posted message ({} chars)", message.chars().count());
        Ok(())
    }

    /// Submit a multipart form. The server answers with a redirect to the
    /// dashboard, which the client follows.
    async fn post_form(&self, path: &str, form: Form, context: &str) -> AppResult<()> {
        let response = self
            .http
            .post(self.url(path)?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| from_reqwest(context, e))?;

        Self::ensure_logged_in(&response, context)?;
        let status = response.status();
        if !status.is_success() {
            return Err(from_status(context, status));
        }
        Ok(())
    }
}

#[async_trait]
impl RefreshSource for TeamConnectClient {
    async fn refresh(&self) -> AppResult<()> {
        self.fetch_dashboard().await.map(|_| ())
    }
}
