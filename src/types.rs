//! Basic type definitions for the chat relay
//!
//! Provides the `ConnectionId` newtype: a UUID-based opaque handle for one
//! open client connection, used as the registry key.

use uuid::Uuid;

/// Unique connection handle (newtype pattern)
///
/// Wraps a UUID v4 for type-safe identification of one accepted connection.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
