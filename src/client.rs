//! Last.fm authentication client implementation.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::auth::{ApiRequest, Credentials, SignedRequest};
use crate::endpoints::{LASTFM_API_URL, LASTFM_AUTH_URL, methods};
use crate::error::{ApiError, LastFmError};
use crate::types::{RequestToken, Session};

/// Client for the Last.fm desktop authentication handshake.
///
/// The handshake has three steps:
/// 1. [`fetch_request_token`](Self::fetch_request_token) mints a token.
/// 2. The user opens [`auth_url`](Self::auth_url) in a browser and grants access.
/// 3. [`fetch_session_key`](Self::fetch_session_key) exchanges the token for a session.
///
/// The client holds no credentials. Each call borrows [`Credentials`] just
/// long enough to sign its request, so the shared secret never outlives the
/// caller's own copy.
///
/// No retries are performed; a failed step must be re-triggered by the caller.
///
/// # Example
///
/// ```rust,no_run
/// use lastfm_auth_client::LastFmAuthClient;
/// use lastfm_auth_client::auth::Credentials;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = LastFmAuthClient::new();
///     let credentials = Credentials::new("api_key", "api_secret");
///
///     let token = client.fetch_request_token(&credentials).await?;
///     println!("Open {} and grant access", client.auth_url(&credentials.api_key, &token));
///
///     // ... once the user is back from the browser:
///     let session = client.fetch_session_key(&credentials, &token).await?;
///     println!("Connected as {}", session.username);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LastFmAuthClient {
    http_client: ClientWithMiddleware,
    api_url: String,
    auth_url: String,
}

impl LastFmAuthClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> LastFmAuthClientBuilder {
        LastFmAuthClientBuilder::new()
    }

    /// Step 1: ask Last.fm for a fresh, unauthorized request token.
    pub async fn fetch_request_token(
        &self,
        credentials: &Credentials,
    ) -> Result<RequestToken, LastFmError> {
        tracing::debug!(api_key = %credentials.api_key, "Requesting Last.fm auth token");

        let request = ApiRequest::new(methods::AUTH_GET_TOKEN).sign(credentials);
        let result = self
            .signed_get(&request)
            .await
            .and_then(|object| RequestToken::from_response(&object));

        if let Err(e) = &result {
            tracing::warn!(kind = ?e.kind(), "Failed to fetch Last.fm request token: {}", e);
        }
        result
    }

    /// Step 2: the URL the user must open to authorize `token`.
    ///
    /// No request is made; an invalid or expired token is only rejected by
    /// Last.fm when the page is visited.
    pub fn auth_url(&self, api_key: &str, token: &RequestToken) -> String {
        build_auth_url(&self.auth_url, api_key, token.as_str())
    }

    /// Step 3: exchange an authorized request token for a session.
    ///
    /// Calling this before the user has granted access is valid; Last.fm
    /// rejects it and the rejection is returned as
    /// [`LastFmError::Api`]. Expired and already-used tokens are reported the
    /// same way.
    pub async fn fetch_session_key(
        &self,
        credentials: &Credentials,
        token: &RequestToken,
    ) -> Result<Session, LastFmError> {
        tracing::debug!(api_key = %credentials.api_key, "Exchanging Last.fm token for a session");

        let request = ApiRequest::new(methods::AUTH_GET_SESSION)
            .param("token", token.as_str())
            .sign(credentials);
        let result = self
            .signed_get(&request)
            .await
            .and_then(|object| Session::from_response(&object));

        match &result {
            Ok(session) => tracing::debug!(username = %session.username, "Last.fm session established"),
            Err(e) => tracing::warn!(kind = ?e.kind(), "Failed to fetch Last.fm session key: {}", e),
        }
        result
    }

    /// Send a signed GET request and return the top-level JSON object.
    ///
    /// Structured Last.fm errors (`{"error": n, "message": "..."}`) are
    /// returned as [`LastFmError::Api`].
    pub async fn signed_get(
        &self,
        request: &SignedRequest,
    ) -> Result<Map<String, Value>, LastFmError> {
        let query_string = serde_urlencoded::to_string(request.query_pairs())
            .map_err(|e| LastFmError::InvalidResponse(e.to_string()))?;
        let url = format!("{}?{}", self.api_url, query_string);

        let response = self.http_client.get(&url).send().await?;
        self.parse_response(response).await
    }

    /// Parse a response body into a JSON object.
    async fn parse_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Map<String, Value>, LastFmError> {
        let status = response.status();
        let body = response.text().await?;

        // Last.fm sends JSON error bodies with 4xx statuses, so parse before
        // looking at the status.
        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                LastFmError::InvalidResponse(format!("Failed to parse response: {}", e))
            } else {
                LastFmError::InvalidResponse(format!("HTTP {}: {}", status, body))
            }
        })?;

        let Value::Object(object) = parsed else {
            return Err(LastFmError::invalid_response("Response is not a JSON object"));
        };

        if object.contains_key("error") {
            if let Some(api_error) = ApiError::from_object(&object) {
                return Err(LastFmError::Api(api_error));
            }
        }

        Ok(object)
    }
}

impl Default for LastFmAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LastFmAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmAuthClient")
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

/// Builder for [`LastFmAuthClient`].
pub struct LastFmAuthClientBuilder {
    api_url: String,
    auth_url: String,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl LastFmAuthClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_url: LASTFM_API_URL.to_string(),
            auth_url: LASTFM_AUTH_URL.to_string(),
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the API endpoint (useful for testing with a mock server).
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the browser authorization page.
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a total timeout for each request. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> LastFmAuthClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("lastfm-auth-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("lastfm-auth-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        LastFmAuthClient {
            http_client: client,
            api_url: self.api_url,
            auth_url: self.auth_url,
        }
    }
}

impl Default for LastFmAuthClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The browser authorization URL on last.fm for `api_key` and `token`.
///
/// ```rust
/// use lastfm_auth_client::get_auth_url;
///
/// assert_eq!(
///     get_auth_url("abc", "tok1"),
///     "https://www.last.fm/api/auth/?api_key=abc&token=tok1"
/// );
/// ```
pub fn get_auth_url(api_key: &str, token: &str) -> String {
    build_auth_url(LASTFM_AUTH_URL, api_key, token)
}

fn build_auth_url(base: &str, api_key: &str, token: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("api_key", api_key)
        .append_pair("token", token)
        .finish();
    format!("{}?{}", base, query)
}
