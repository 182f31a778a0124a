//! Last.fm endpoint and method constants.

/// Base URL for the Last.fm web service API.
pub const LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Page the user opens in a browser to authorize a request token.
pub const LASTFM_AUTH_URL: &str = "https://www.last.fm/api/auth/";

/// Value of the `format` query parameter selecting JSON responses.
pub const FORMAT_JSON: &str = "json";

/// API method names.
pub mod methods {
    /// Mint an unauthorized request token.
    pub const AUTH_GET_TOKEN: &str = "auth.getToken";
    /// Exchange an authorized token for a session.
    pub const AUTH_GET_SESSION: &str = "auth.getSession";
}
