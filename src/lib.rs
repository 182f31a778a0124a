//! # Last.fm Auth Client
//!
//! An async Rust client for the Last.fm desktop authentication handshake.
//!
//! ## Features
//!
//! - MD5 `api_sig` request signing
//! - Request token, authorization URL and session exchange
//! - Every failure returned as a typed [`LastFmError`], never a panic
//! - Shared secrets kept in [`secrecy`] wrappers and never stored by the client
//! - An optional [`flow::AuthFlow`] driver for settings screens
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lastfm_auth_client::LastFmAuthClient;
//! use lastfm_auth_client::auth::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LastFmAuthClient::new();
//!     let credentials = Credentials::from_env();
//!     let token = client.fetch_request_token(&credentials).await?;
//!     println!("Authorize at {}", client.auth_url(&credentials.api_key, &token));
//!     Ok(())
//! }
//! ```

pub mod auth;
mod client;
pub mod endpoints;
pub mod error;
pub mod flow;
mod traits;
pub mod types;

// Re-export commonly used types at crate root
pub use auth::{Credentials, generate_api_sig};
pub use client::{LastFmAuthClient, LastFmAuthClientBuilder, get_auth_url};
pub use error::{ErrorKind, LastFmError};
pub use traits::ScrobbleAuth;
pub use types::{RequestToken, Session};

/// Result type alias using LastFmError
pub type Result<T> = std::result::Result<T, LastFmError>;
