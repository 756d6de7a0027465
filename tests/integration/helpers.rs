//! Shared test helpers for integration tests.
//!
//! [`MockServer`] is an in-process axum app that answers like the
//! TeamConnect server for the routes the client touches.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{delete, get, post};
use serde_json::json;

use teamconnect_client::TeamConnectClient;
use teamconnect_core::config::AppConfig;

/// Session cookie value the mock server accepts.
pub const SESSION: &str = "test-session";

/// A multipart form the server received.
#[derive(Debug, Clone, Default)]
pub struct ReceivedForm {
    /// Text fields by name.
    pub fields: HashMap<String, String>,
    /// File fields: (field name, file name, byte length).
    pub files: Vec<(String, String, usize)>,
}

/// What the server has seen so far.
#[derive(Debug, Default)]
pub struct Recorded {
    /// Dashboard GETs with a valid session.
    pub dashboard_hits: AtomicUsize,
    /// Paths of successful deletes.
    pub deletes: Mutex<Vec<String>>,
    /// Forms posted, keyed by path.
    pub forms: Mutex<Vec<(String, ReceivedForm)>>,
}

/// Running mock server.
pub struct MockServer {
    /// Address the server listens on.
    pub addr: SocketAddr,
    /// Requests recorded by the server.
    pub recorded: Arc<Recorded>,
}

impl MockServer {
    /// Start a server on an ephemeral port.
    pub async fn start() -> Self {
        let recorded = Arc::new(Recorded::default());

        let app = Router::new()
            .route("/dashboard", get(dashboard))
            .route("/login", get(|| async { "Please log in" }))
            .route("/file/{id}", delete(delete_file))
            .route("/snippet/{id}", delete(delete_snippet))
            .route("/upload", post(submit_form))
            .route("/code", post(submit_form))
            .route("/message", post(submit_form))
            .with_state(Arc::clone(&recorded));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self { addr, recorded }
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client config pointing at this server with a valid session.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.base_url = self.base_url();
        config.server.session_cookie = Some(SESSION.to_string());
        config.server.request_timeout_seconds = 5;
        config
    }

    /// Client with a valid session.
    pub fn client(&self) -> TeamConnectClient {
        TeamConnectClient::from_config(&self.config()).expect("Failed to build client")
    }

    /// Client without a session cookie.
    pub fn anonymous_client(&self) -> TeamConnectClient {
        let mut config = self.config();
        config.server.session_cookie = None;
        TeamConnectClient::from_config(&config).expect("Failed to build client")
    }

    /// Number of authenticated dashboard fetches.
    pub fn dashboard_hits(&self) -> usize {
        self.recorded.dashboard_hits.load(Ordering::SeqCst)
    }

    /// Forms posted to `path`.
    pub fn forms(&self, path: &str) -> Vec<ReceivedForm> {
        self.recorded
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, f)| f.clone())
            .collect()
    }

    /// Paths deleted so far.
    pub fn deletes(&self) -> Vec<String> {
        self.recorded.deletes.lock().unwrap().clone()
    }
}

/// Poll `condition` until it holds, failing after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("Condition not met within 5s");
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|pair| pair.trim() == format!("session_id={SESSION}"))
}

async fn dashboard(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Response {
    if !has_session(&headers) {
        return Redirect::to("/login").into_response();
    }
    recorded.dashboard_hits.fetch_add(1, Ordering::SeqCst);
    "<html><body>dashboard</body></html>".into_response()
}

fn delete_response(recorded: &Recorded, headers: &HeaderMap, path: String, id: &str) -> Response {
    if !has_session(headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Not authenticated"})),
        )
            .into_response();
    }
    match id {
        "missing" => (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response(),
        "someone-else" => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Not authorized"})),
        )
            .into_response(),
        "soft-fail" => Json(json!({"success": false})).into_response(),
        _ => {
            recorded.deletes.lock().unwrap().push(path);
            Json(json!({"success": true})).into_response()
        }
    }
}

async fn delete_file(
    State(recorded): State<Arc<Recorded>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    delete_response(&recorded, &headers, format!("/file/{id}"), &id)
}

async fn delete_snippet(
    State(recorded): State<Arc<Recorded>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    delete_response(&recorded, &headers, format!("/snippet/{id}"), &id)
}

async fn submit_form(
    State(recorded): State<Arc<Recorded>>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !has_session(&headers) {
        return Redirect::to("/login").into_response();
    }

    let mut form = ReceivedForm::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap();
                form.files.push((name, file_name, bytes.len()));
            }
            None => {
                let text = field.text().await.unwrap();
                form.fields.insert(name, text);
            }
        }
    }
    recorded
        .forms
        .lock()
        .unwrap()
        .push((uri.path().to_string(), form));

    Redirect::to("/dashboard").into_response()
}
