//! Error types for the highlighting engine
//!
//! Every fallible core operation returns [`HighlightError`]. The JS-facing
//! layer turns these into `JsValue` strings at the boundary.

use thiserror::Error;

/// Top-level engine error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HighlightError {
    /// A DOM mutation or query failed (node detached, element creation refused, ...)
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// The dictionary payload could not be parsed at all
    #[error("Invalid dictionary payload: {0}")]
    Payload(String),

    /// The capture server could not be reached or answered with an error
    #[error("Network request failed: {0}")]
    Network(String),

    /// Operation requires an active highlight session
    #[error("Highlight session is not active")]
    SessionInactive,

    /// Protocol settings could not be turned into a capture target
    #[error("Invalid protocol setting: {0}")]
    InvalidProtocol(String),
}

impl From<serde_json::Error> for HighlightError {
    fn from(err: serde_json::Error) -> Self {
        HighlightError::Payload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HighlightError>;
