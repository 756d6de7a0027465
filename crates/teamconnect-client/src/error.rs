//! Mapping of HTTP failures into [`AppError`].

use reqwest::StatusCode;

use teamconnect_core::error::{AppError, ErrorKind};

/// Map a transport-level reqwest error.
pub fn from_reqwest(context: &str, err: reqwest::Error) -> AppError {
    let kind = if err.is_decode() {
        ErrorKind::Serialization
    } else if err.is_builder() {
        ErrorKind::Validation
    } else {
        ErrorKind::Network
    };
    let message = if err.is_timeout() {
        format!("{context}: request timed out")
    } else {
        format!("{context}: {err}")
    };
    AppError::with_source(kind, message, err)
}

/// Error kind for a non-success HTTP status.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ErrorKind::ServiceUnavailable
        }
        s if s.is_success() => ErrorKind::Application,
        _ => ErrorKind::Internal,
    }
}

/// Build an error for a non-success HTTP status.
pub fn from_status(context: &str, status: StatusCode) -> AppError {
    AppError::new(
        kind_for_status(status),
        format!("{context}: server answered {status}"),
    )
}
