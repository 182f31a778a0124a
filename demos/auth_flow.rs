//! Example: Connect a Last.fm account interactively.
//!
//! Reads `LASTFM_API_KEY` and `LASTFM_API_SECRET` (a `.env` file works too).
//!
//! Run with: cargo run --example auth_flow

use std::io::BufRead;

use lastfm_auth_client::flow::AuthFlow;
use lastfm_auth_client::{Credentials, LastFmAuthClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(credentials) = Credentials::try_from_env() else {
        println!("Set LASTFM_API_KEY and LASTFM_API_SECRET to run this example.");
        return Ok(());
    };

    let mut flow = AuthFlow::new(LastFmAuthClient::new());

    let url = match flow.start(&credentials).await {
        Ok(url) => url,
        Err(e) => {
            println!("Could not start authentication: {}", e.message());
            return Ok(());
        }
    };
    println!("Open this page and grant access, then press Enter:\n{}", url);

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    match flow.complete(&credentials).await {
        Ok(session) => println!("Connected as {}", session.username),
        Err(e) => println!("Not connected ({:?}): {}", e.kind(), e.message()),
    }

    Ok(())
}
