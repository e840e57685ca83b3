//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Marketo client
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum MarketoError {
    /// The transport could not reach the Marketo server (connect failure or
    /// timeout). Distinct from API-level errors so callers can tell "server
    /// unreachable" from "server rejected the call".
    #[error("Connection error: {0}")]
    Connection(String),

    /// Application error reported by the Marketo API, taken verbatim from the
    /// first element of the response `errors` list.
    #[error("Marketo API error #{code}: {message}")]
    Api { code: String, message: String },

    /// The response carried an `errors` list whose first entry was missing
    /// the expected `code`/`message` fields.
    #[error("Marketo API returned an unrecognized error payload: {0}")]
    UnknownApi(String),

    /// A caller-supplied cookie did not contain the instance cookie prefix.
    #[error("Invalid cookie format: {0}")]
    InvalidCookie(String),

    /// The response body could not be decoded as the expected JSON shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Marketo client operations
pub type Result<T> = std::result::Result<T, MarketoError>;
