//! Error types for the Last.fm auth client.

use thiserror::Error;

/// The main error type for all Last.fm client operations.
#[derive(Error, Debug)]
pub enum LastFmError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Last.fm returned a structured error object
    #[error("Last.fm API error: {0}")]
    Api(ApiError),

    /// A session exchange was attempted without a pending request token
    #[error("No pending request token; start authentication first")]
    NoPendingToken,
}

/// Coarse classification of a [`LastFmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network unreachable, timeout, TLS failure.
    Transport,
    /// Body is not JSON, or lacks a field at the expected shape.
    MalformedResponse,
    /// Last.fm answered with an error object.
    RemoteRejected,
    /// The caller-side flow was driven out of order.
    InvalidState,
}

impl LastFmError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::HttpMiddleware(_) => ErrorKind::Transport,
            Self::Json(_) | Self::InvalidResponse(_) => ErrorKind::MalformedResponse,
            Self::Api(_) => ErrorKind::RemoteRejected,
            Self::NoPendingToken => ErrorKind::InvalidState,
        }
    }

    /// Human-readable message suitable for showing to the user.
    ///
    /// For remote rejections this is Last.fm's `message` field verbatim.
    pub fn message(&self) -> String {
        match self {
            Self::Api(api_error) => api_error.message.clone(),
            Self::InvalidResponse(message) => message.clone(),
            Self::Http(e) => e.to_string(),
            Self::HttpMiddleware(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

/// Error object returned by Last.fm in a response body.
///
/// Last.fm reports failures as `{"error": <code>, "message": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Numeric error code, when the service supplied one
    pub code: Option<u32>,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Extract a structured error from a top-level response object.
    ///
    /// Returns `None` when the object has no `message` field.
    pub fn from_object(object: &serde_json::Map<String, serde_json::Value>) -> Option<Self> {
        let message = object.get("message")?.as_str()?;
        let code = object
            .get("error")
            .and_then(serde_json::Value::as_u64)
            .and_then(|code| u32::try_from(code).ok());
        Some(Self::new(code, message))
    }
}
