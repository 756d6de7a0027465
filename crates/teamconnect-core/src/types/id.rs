//! Newtype wrappers around the server's opaque resource identifiers.
//!
//! The server issues random hex tokens for files, snippets, and messages.
//! Using distinct types prevents accidentally passing a `SnippetId` where a
//! `FileId` is expected, and parsing guarantees an id is safe to splice into
//! a URL path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Check that an identifier is non-empty and contains only path-safe ASCII.
fn validate_id(kind: &str, raw: &str) -> Result<(), AppError> {
    if raw.is_empty() {
        return Err(AppError::validation(format!("{kind} id must not be empty")));
    }
    if let Some(bad) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(AppError::validation(format!(
            "{kind} id '{raw}' contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Macro to define a newtype ID wrapper around a validated `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and validate an identifier.
            pub fn parse(raw: impl Into<String>) -> Result<Self, AppError> {
                let raw = raw.into();
                validate_id($label, &raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::parse(raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of an uploaded file.
    FileId, "file"
);

define_id!(
    /// Identifier of a code snippet.
    SnippetId, "snippet"
);

define_id!(
    /// Identifier of a team message.
    MessageId, "message"
);
