//! Chat relay server
//!
//! Binds the listening socket, owns the shared connection registry, and
//! spawns one worker task per accepted connection. The listener is the sole
//! acceptor; an `accept()` failure is fatal and ends the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::broadcast::Broadcaster;
use crate::config::Config;
use crate::error::AppError;
use crate::handler::handle_connection;
use crate::names::NameGenerator;
use crate::registry::Registry;

/// Accept loop plus the shared state handed to every worker
pub struct ChatServer {
    listener: TcpListener,
    registry: Arc<Registry>,
    broadcaster: Broadcaster,
    names: NameGenerator,
    outbound_buffer: usize,
}

impl ChatServer {
    /// Bind the listening socket and set up shared state
    pub async fn bind(config: &Config) -> Result<Self, AppError> {
        let listener = TcpListener::bind(config.addr()).await?;
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(
            Arc::clone(&registry),
            Duration::from_millis(config.send_timeout_ms),
        );

        Ok(Self {
            listener,
            registry,
            broadcaster,
            names: NameGenerator::new(),
            outbound_buffer: config.outbound_buffer,
        })
    }

    /// Address the server is actually listening on
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle on the connection registry
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Run the accept loop
    ///
    /// Each accepted connection gets its own worker task; a worker's failure
    /// is logged and contained. An accept failure propagates and ends the
    /// server.
    pub async fn run(self) -> Result<(), AppError> {
        info!("Server listening on {}", self.listener.local_addr()?);

        loop {
            let (stream, peer_addr) = self.listener.accept().await?;
            debug!("accepted connection from {}", peer_addr);

            let registry = Arc::clone(&self.registry);
            let broadcaster = self.broadcaster.clone();
            let names = self.names;
            let outbound_buffer = self.outbound_buffer;

            tokio::spawn(async move {
                if let Err(err) = handle_connection(
                    stream,
                    peer_addr,
                    registry,
                    broadcaster,
                    names,
                    outbound_buffer,
                )
                .await
                {
                    error!("connection worker for {} failed: {}", peer_addr, err);
                }
            });
        }
    }
}
