//! Values produced by the authentication handshake.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, LastFmError};

/// An unauthorized request token minted by `auth.getToken`.
///
/// Tokens are single-use and short-lived. Keep one in memory only between
/// requesting it and exchanging it for a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken(String);

impl RequestToken {
    /// Wrap a token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Extract the token from an `auth.getToken` response object.
    pub(crate) fn from_response(object: &Map<String, Value>) -> Result<Self, LastFmError> {
        match object.get("token") {
            Some(value) => match value.as_str() {
                Some(token) if !token.is_empty() => Ok(Self::new(token)),
                _ => Err(LastFmError::invalid_response("Token is null")),
            },
            None => Err(rejection_or(object, "Unknown error")),
        }
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authorized Last.fm session.
///
/// A session is valid only when both fields are non-empty; the absence of a
/// session means the user is not authenticated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The Last.fm username that granted access
    pub username: String,
    /// Durable key for subsequent signed calls
    pub session_key: String,
}

impl Session {
    /// Create a session from a username and session key.
    pub fn new(username: impl Into<String>, session_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_key: session_key.into(),
        }
    }

    /// Whether both the username and key are present.
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty() && !self.session_key.is_empty()
    }

    /// Split into `(username, session_key)`.
    pub fn into_parts(self) -> (String, String) {
        (self.username, self.session_key)
    }

    /// Extract the session from an `auth.getSession` response object.
    pub(crate) fn from_response(object: &Map<String, Value>) -> Result<Self, LastFmError> {
        let Some(session) = object.get("session") else {
            return Err(rejection_or(object, "Failed to get session"));
        };
        let session = session
            .as_object()
            .ok_or_else(|| LastFmError::invalid_response("Session is not an object"))?;

        let username = non_empty_str(session, "name")
            .ok_or_else(|| LastFmError::invalid_response("Username is null"))?;
        let session_key = non_empty_str(session, "key")
            .ok_or_else(|| LastFmError::invalid_response("Session key is null"))?;

        Ok(Self::new(username, session_key))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("session_key", &"[REDACTED]")
            .finish()
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// The service's own error if it sent one, otherwise a malformed-response
/// error with `fallback` as the message.
fn rejection_or(object: &Map<String, Value>, fallback: &str) -> LastFmError {
    match ApiError::from_object(object) {
        Some(api_error) => LastFmError::Api(api_error),
        None => LastFmError::invalid_response(fallback),
    }
}
