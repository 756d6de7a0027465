//! # teamconnect-client
//!
//! HTTP client for the TeamConnect server. Covers the dashboard fetch used
//! by the auto-refresh, the file and snippet delete actions, and the form
//! posts behind the upload, code, and message pages.

pub mod client;
pub mod dto;
pub mod error;

pub use client::TeamConnectClient;
pub use dto::{DashboardFetch, DeleteResponse, NewSnippet, UploadReceipt};
