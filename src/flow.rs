//! Caller-side driver for the authentication handshake.
//!
//! The client itself is stateless. [`AuthFlow`] keeps the pending request
//! token between "start" and "complete" so a settings screen only has to
//! forward the user's two clicks:
//!
//! ```text
//! Unauthenticated --start--> AwaitingAuthorization --complete--> Authenticated
//!        ^                          |                                |
//!        +------- any failure ------+------------ sign_out ----------+
//! ```
//!
//! Nothing is retried or polled. Credentials are passed to each step and
//! never stored.

use crate::auth::Credentials;
use crate::error::LastFmError;
use crate::traits::ScrobbleAuth;
use crate::types::{RequestToken, Session};

/// Where the user currently is in the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No session and no pending token.
    #[default]
    Unauthenticated,
    /// A token was minted and the user has been sent to `auth_url`.
    AwaitingAuthorization {
        /// The single-use token to exchange
        token: RequestToken,
        /// Page the user must open
        auth_url: String,
    },
    /// A session was obtained or restored.
    Authenticated(Session),
}

/// Tracks the handshake for one user.
#[derive(Debug)]
pub struct AuthFlow<C> {
    client: C,
    state: AuthState,
}

impl<C: ScrobbleAuth> AuthFlow<C> {
    /// Create an unauthenticated flow.
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: AuthState::Unauthenticated,
        }
    }

    /// The current state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Whether a session is held.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// The authorization page for the pending token, if any.
    pub fn pending_auth_url(&self) -> Option<&str> {
        match &self.state {
            AuthState::AwaitingAuthorization { auth_url, .. } => Some(auth_url),
            _ => None,
        }
    }

    /// Mint a new request token and return the URL the user must open.
    ///
    /// Any previous token or session is discarded first.
    pub async fn start(&mut self, credentials: &Credentials) -> Result<String, LastFmError> {
        self.state = AuthState::Unauthenticated;

        let token = self.client.fetch_request_token(credentials).await?;
        let auth_url = self.client.auth_url(&credentials.api_key, &token);
        self.state = AuthState::AwaitingAuthorization {
            token,
            auth_url: auth_url.clone(),
        };
        Ok(auth_url)
    }

    /// Exchange the pending token for a session.
    ///
    /// The token is consumed whether or not the exchange succeeds; on failure
    /// the flow is back to [`AuthState::Unauthenticated`] and the user has to
    /// start again.
    pub async fn complete(&mut self, credentials: &Credentials) -> Result<Session, LastFmError> {
        let token = match std::mem::take(&mut self.state) {
            AuthState::AwaitingAuthorization { token, .. } => token,
            other => {
                self.state = other;
                return Err(LastFmError::NoPendingToken);
            }
        };

        let session = self.client.fetch_session_key(credentials, &token).await?;
        self.state = AuthState::Authenticated(session.clone());
        Ok(session)
    }

    /// Resume from a session loaded from storage.
    ///
    /// An invalid session (empty username or key) leaves the flow
    /// unauthenticated and returns `false`.
    pub fn restore(&mut self, session: Session) -> bool {
        if session.is_valid() {
            self.state = AuthState::Authenticated(session);
            true
        } else {
            self.state = AuthState::Unauthenticated;
            false
        }
    }

    /// Forget any pending token or session.
    pub fn sign_out(&mut self) {
        self.state = AuthState::Unauthenticated;
    }
}
