//! Example: Working with LastFmError and ApiError.
//!
//! Run with: cargo run --example error_handling

use lastfm_auth_client::error::ApiError;
use lastfm_auth_client::{ErrorKind, LastFmError};

fn main() {
    let api_error = ApiError::new(Some(14), "Unauthorized Token - This token has not been authorized");
    println!("API error: {}", api_error);

    let err = LastFmError::Api(api_error);
    match err.kind() {
        ErrorKind::RemoteRejected => println!("Last.fm said: {}", err.message()),
        ErrorKind::Transport => println!("Network problem, try again later"),
        ErrorKind::MalformedResponse | ErrorKind::InvalidState => {
            println!("Unexpected error: {}", err)
        }
    }
}
