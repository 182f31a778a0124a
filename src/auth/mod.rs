//! Authentication module for the Last.fm API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - MD5 `api_sig` generation for signed requests

mod credentials;
mod signature;

pub use credentials::{API_KEY_VAR, API_SECRET_VAR, Credentials};
pub use signature::{ApiRequest, SignedRequest, generate_api_sig};
