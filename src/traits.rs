//! Trait definition for the Last.fm authentication handshake.
//!
//! [`ScrobbleAuth`] abstracts the three handshake steps so that callers such
//! as [`AuthFlow`](crate::flow::AuthFlow) can be driven by a mock in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use lastfm_auth_client::{LastFmError, ScrobbleAuth};
//! use lastfm_auth_client::auth::Credentials;
//!
//! async fn begin<C: ScrobbleAuth>(client: &C, credentials: &Credentials) -> Result<String, LastFmError> {
//!     let token = client.fetch_request_token(credentials).await?;
//!     Ok(client.auth_url(&credentials.api_key, &token))
//! }
//! ```

use std::future::Future;

use crate::auth::Credentials;
use crate::client::LastFmAuthClient;
use crate::error::LastFmError;
use crate::types::{RequestToken, Session};

/// The Last.fm token/session handshake.
pub trait ScrobbleAuth: Send + Sync {
    /// Mint an unauthorized request token.
    fn fetch_request_token(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<RequestToken, LastFmError>> + Send;

    /// URL the user opens to authorize `token`.
    fn auth_url(&self, api_key: &str, token: &RequestToken) -> String;

    /// Exchange an authorized token for a session.
    fn fetch_session_key(
        &self,
        credentials: &Credentials,
        token: &RequestToken,
    ) -> impl Future<Output = Result<Session, LastFmError>> + Send;
}

impl ScrobbleAuth for LastFmAuthClient {
    async fn fetch_request_token(
        &self,
        credentials: &Credentials,
    ) -> Result<RequestToken, LastFmError> {
        LastFmAuthClient::fetch_request_token(self, credentials).await
    }

    fn auth_url(&self, api_key: &str, token: &RequestToken) -> String {
        LastFmAuthClient::auth_url(self, api_key, token)
    }

    async fn fetch_session_key(
        &self,
        credentials: &Credentials,
        token: &RequestToken,
    ) -> Result<Session, LastFmError> {
        LastFmAuthClient::fetch_session_key(self, credentials, token).await
    }
}
