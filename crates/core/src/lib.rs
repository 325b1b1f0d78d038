//! Shared primitives for all Rust crates in Rolescope.

#![forbid(unsafe_code)]

/// Directory identity primitives shared across services.
pub mod identity;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use identity::UserPrincipalName;

/// Result type used across Rolescope crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller is not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The identity provider did not issue an access token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The directory API answered with a non-success status.
    #[error("upstream returned status {status}: {message}")]
    Upstream {
        /// HTTP status code returned by the upstream service.
        status: u16,
        /// Response body or short description.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
