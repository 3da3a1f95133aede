//! Chat relay server - entry point
//!
//! Loads configuration, binds the listener and runs the accept loop.

use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use chat_relay::{ChatServer, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_relay=info")),
        )
        .init();

    // Optional config file path as the first argument
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    let server = ChatServer::bind(&config).await?;
    server.run().await?;

    Ok(())
}
