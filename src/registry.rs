//! Connection registry
//!
//! The only shared mutable state on the server: a mutex-guarded map from
//! connection handle to the peer's display name and outbound channel.
//!
//! The lock is never held across an `await`. Callers that need to perform
//! network I/O take a [`Registry::snapshot`] first and send after the lock is
//! released, so a slow peer can never stall registration or removal of
//! unrelated connections.
//!
//! An entry's sender is the last long-lived handle on that connection's
//! outbound channel; removing the entry lets the connection's writer task
//! drain and close the socket. That gives both cleanup paths (worker exit and
//! broadcast delivery failure) one shared, idempotent removal primitive.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::RegistryError;
use crate::types::ConnectionId;

/// One registered peer as seen by a broadcast
///
/// A cheap clone of the registry entry: the display name plus a handle on the
/// peer's outbound channel.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    /// Connection handle this peer is registered under
    pub id: ConnectionId,
    /// Display name assigned at registration
    pub name: String,
    /// Channel into the peer's writer task
    pub outbound: mpsc::Sender<String>,
}

/// Shared map of currently active connections
#[derive(Debug, Default)]
pub struct Registry {
    peers: Mutex<HashMap<ConnectionId, PeerHandle>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection under a display name
    ///
    /// Fails with [`RegistryError::DuplicateHandle`] if the handle is already
    /// present; that indicates a listener/worker lifecycle bug.
    pub fn register(
        &self,
        id: ConnectionId,
        name: String,
        outbound: mpsc::Sender<String>,
    ) -> Result<(), RegistryError> {
        let mut peers = self.peers.lock();
        if peers.contains_key(&id) {
            return Err(RegistryError::DuplicateHandle(id));
        }
        peers.insert(id, PeerHandle { id, name, outbound });
        debug!("registered {} ({} active)", id, peers.len());
        Ok(())
    }

    /// Remove a connection if present
    ///
    /// Idempotent: removing an absent handle is a no-op, so the worker-exit
    /// and broadcast-failure cleanup paths can both call it. Returns whether
    /// an entry was actually removed.
    pub fn deregister(&self, id: ConnectionId) -> bool {
        let mut peers = self.peers.lock();
        let removed = peers.remove(&id).is_some();
        if removed {
            debug!("deregistered {} ({} active)", id, peers.len());
        }
        removed
    }

    /// Point-in-time copy of all registered peers
    ///
    /// Used by the broadcaster so sends happen after the lock is released.
    pub fn snapshot(&self) -> Vec<PeerHandle> {
        self.peers.lock().values().cloned().collect()
    }

    /// Display name for a handle, if registered
    pub fn name_of(&self, id: ConnectionId) -> Option<String> {
        self.peers.lock().get(&id).map(|peer| peer.name.clone())
    }

    /// Number of currently registered connections
    pub fn len(&self) -> usize {
        self.peers.lock().len()
    }

    /// Whether no connections are registered
    pub fn is_empty(&self) -> bool {
        self.peers.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbound() -> mpsc::Sender<String> {
        let (tx, _rx) = mpsc::channel(8);
        tx
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new();
        let id = ConnectionId::new();

        registry.register(id, "sunny_lynx07".into(), outbound()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name_of(id).as_deref(), Some("sunny_lynx07"));
    }

    #[test]
    fn test_duplicate_handle_rejected() {
        let registry = Registry::new();
        let id = ConnectionId::new();

        registry.register(id, "first".into(), outbound()).unwrap();
        let result = registry.register(id, "second".into(), outbound());

        assert_eq!(result, Err(RegistryError::DuplicateHandle(id)));
        // original entry untouched
        assert_eq!(registry.name_of(id).as_deref(), Some("first"));
    }

    #[test]
    fn test_deregister_is_idempotent() {
        let registry = Registry::new();
        let id = ConnectionId::new();

        registry.register(id, "gone_soon".into(), outbound()).unwrap();

        assert!(registry.deregister(id));
        assert!(!registry.deregister(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deregister_unknown_handle_is_noop() {
        let registry = Registry::new();
        assert!(!registry.deregister(ConnectionId::new()));
    }

    #[test]
    fn test_snapshot_is_point_in_time() {
        let registry = Registry::new();
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();

        registry.register(id1, "one".into(), outbound()).unwrap();
        registry.register(id2, "two".into(), outbound()).unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);

        // mutations after the snapshot do not affect it
        registry.deregister(id1);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_register_deregister() {
        use std::sync::Arc;

        let registry = Arc::new(Registry::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    let id = ConnectionId::new();
                    let (tx, _rx) = mpsc::channel(1);
                    registry.register(id, "worker".into(), tx).unwrap();
                    let _ = registry.snapshot();
                    assert!(registry.deregister(id));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(registry.is_empty());
    }
}
