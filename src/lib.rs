//! Multi-Client TCP Chat Relay Library
//!
//! A minimal chat service built on tokio: the server accepts TCP
//! connections, assigns each client a display name, and relays every chat
//! line to all other connected clients; the client forwards interactive
//! input and prints whatever the server relays.
//!
//! # Features
//! - Plain TCP transport with newline-delimited text lines
//! - Random display name per connection
//! - Join and departure announcements
//! - Best-effort broadcast: a dead recipient is dropped, the rest still
//!   receive the message
//! - JSON config file for address and hardening knobs
//!
//! # Architecture
//! Shared state is a single mutex-guarded [`registry::Registry`] mapping
//! connection handles to display names and outbound channels. Each accepted
//! connection runs its own worker task; each socket has exactly one writer
//! task draining a bounded channel, so every relayed line reaches the wire
//! as one atomic write. Broadcasts snapshot the registry and send with no
//! lock held.
//!
//! # Example
//! ```ignore
//! use chat_relay::{ChatServer, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let server = ChatServer::bind(&config).await.unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod broadcast;
pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod names;
pub mod registry;
pub mod server;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use broadcast::Broadcaster;
pub use config::Config;
pub use error::{AppError, DeliveryError, RegistryError};
pub use handler::handle_connection;
pub use message::ChatEvent;
pub use names::NameGenerator;
pub use registry::{PeerHandle, Registry};
pub use server::ChatServer;
pub use types::ConnectionId;
