//! Integration tests for the server client against an in-process server.

mod helpers;

use teamconnect_client::NewSnippet;
use teamconnect_core::error::ErrorKind;
use teamconnect_core::traits::RefreshSource;
use teamconnect_core::types::{FileId, SnippetId};

#[tokio::test]
async fn test_fetch_dashboard_with_session() {
    let server = helpers::MockServer::start().await;
    let client = server.client();

    let fetch = client.fetch_dashboard().await.unwrap();
    assert_eq!(fetch.status, 200);
    assert_eq!(server.dashboard_hits(), 1);

    client.refresh().await.unwrap();
    assert_eq!(server.dashboard_hits(), 2);
}

#[tokio::test]
async fn test_fetch_dashboard_without_session_is_authentication_error() {
    let server = helpers::MockServer::start().await;

    let err = server.anonymous_client().fetch_dashboard().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(server.dashboard_hits(), 0);
}

#[tokio::test]
async fn test_delete_file_and_snippet() {
    let server = helpers::MockServer::start().await;
    let client = server.client();

    client
        .delete_file(&FileId::parse("a1b2c3").unwrap())
        .await
        .unwrap();
    client
        .delete_snippet(&SnippetId::parse("d4e5f6").unwrap())
        .await
        .unwrap();

    assert_eq!(server.deletes(), vec!["/file/a1b2c3", "/snippet/d4e5f6"]);
}

#[tokio::test]
async fn test_delete_failures_carry_server_message() {
    let server = helpers::MockServer::start().await;
    let client = server.client();

    let err = client
        .delete_file(&FileId::parse("missing").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Not found");

    let err = client
        .delete_snippet(&SnippetId::parse("someone-else").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, "Not authorized");

    let err = server
        .anonymous_client()
        .delete_file(&FileId::parse("a1b2c3").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    assert!(server.deletes().is_empty());
}

#[tokio::test]
async fn test_delete_success_false_is_application_error() {
    let server = helpers::MockServer::start().await;

    let err = server
        .client()
        .delete_file(&FileId::parse("soft-fail").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Application);
    assert_eq!(err.message, "Unknown error");
}

#[tokio::test]
async fn test_delete_against_dead_server_is_network_error() {
    let server = helpers::MockServer::start().await;
    let mut config = server.config();
    // Nothing listens on the discard port.
    config.server.base_url = "http://127.0.0.1:9".to_string();
    let client = teamconnect_client::TeamConnectClient::from_config(&config).unwrap();

    let err = client
        .delete_file(&FileId::parse("a1b2c3").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}

#[tokio::test]
async fn test_upload_file_sends_multipart_file_field() {
    let server = helpers::MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"meeting notes").unwrap();

    let receipt = server.client().upload_file(&path).await.unwrap();
    assert_eq!(receipt.file_name, "notes.txt");
    assert_eq!(receipt.size_bytes, 13);

    let forms = server.forms("/upload");
    assert_eq!(forms.len(), 1);
    assert_eq!(
        forms[0].files,
        vec![("file".to_string(), "notes.txt".to_string(), 13)]
    );
}

#[tokio::test]
async fn test_post_snippet_defaults_language() {
    let server = helpers::MockServer::start().await;
    let snippet = NewSnippet::new("Hello", "print('hi')", None);

    server.client().post_snippet(&snippet).await.unwrap();

    let forms = server.forms("/code");
    assert_eq!(forms.len(), 1);
    let fields = &forms[0].fields;
    assert_eq!(fields.get("title").map(String::as_str), Some("Hello"));
    assert_eq!(fields.get("code").map(String::as_str), Some("print('hi')"));
    assert_eq!(fields.get("language").map(String::as_str), Some("text"));
}

#[tokio::test]
async fn test_post_message() {
    let server = helpers::MockServer::start().await;

    server.client().post_message("Standup at 10").await.unwrap();

    let forms = server.forms("/message");
    assert_eq!(
        forms[0].fields.get("message").map(String::as_str),
        Some("Standup at 10")
    );
}

#[tokio::test]
async fn test_form_post_without_session_lands_on_login() {
    let server = helpers::MockServer::start().await;

    let err = server
        .anonymous_client()
        .post_message("hello")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(server.forms("/message").is_empty());
}
