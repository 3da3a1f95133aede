//! Chat relay client - entry point
//!
//! Connects to the server and runs the interactive session: one task prints
//! relayed lines, the main task forwards local input until `quit` or EOF.

use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use chat_relay::{session, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_relay=warn")),
        )
        .init();

    // Optional config file path as the first argument
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    session::run(&config.addr()).await?;

    Ok(())
}
