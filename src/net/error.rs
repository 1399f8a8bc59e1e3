//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Non-success HTTP statuses collapse into one `Status` kind whose display is
//! the status text alone; 4xx and 5xx are not told apart and server error
//! bodies are not parsed.

/// Errors produced by the API client, storage, and configuration layers.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{status_text}")]
    Status { status: u16, status_text: String },

    /// The response body was not valid JSON for the expected type.
    #[error("response parse failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The base URL and path did not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Persisted client storage could not be read or written.
    #[error("storage failed: {0}")]
    Storage(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status for `Status` errors, `None` for every other kind.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
