//! Client error types.

use thiserror::Error;

use catalog_core::FieldErrors;

/// Errors returned by [`CategoryApi`](crate::api::CategoryApi) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the input (422).
    #[error("validation failed")]
    Validation(FieldErrors),

    /// The category does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The server refused the operation (409), e.g. deleting a category with products.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Network failure or undecodable response body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status this client does not handle.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The base URL could not be parsed or joined.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Whether the failure happened below the application protocol.
    ///
    /// Transport failures leave the caller's state untouched and are only logged.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::UnexpectedStatus { .. } | Self::InvalidUrl(_)
        )
    }

    /// Human-readable message for display, if the server supplied one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::NotFound(message) | Self::Conflict(message) => Some(message),
            _ => None,
        }
    }
}
