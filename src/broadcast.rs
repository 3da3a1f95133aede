//! Broadcast fan-out
//!
//! Delivers one chat event to every registered connection except an optional
//! excluded sender. Works from a registry snapshot so no lock is held during
//! delivery, and absorbs per-recipient failures: a dead or stalled recipient
//! is deregistered and the broadcast continues to the rest.
//!
//! Concurrent broadcasts are not serialized against each other. Interleaving
//! stays at whole-line granularity because every event is handed to each
//! recipient's writer task as one complete newline-terminated string, and
//! that task is the sole writer on the socket.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::SendTimeoutError;
use tracing::warn;

use crate::error::DeliveryError;
use crate::message::ChatEvent;
use crate::registry::{PeerHandle, Registry};
use crate::types::ConnectionId;

/// Fan-out of chat events to all registered peers
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<Registry>,
    send_timeout: Duration,
}

impl Broadcaster {
    /// Create a broadcaster over the given registry
    pub fn new(registry: Arc<Registry>, send_timeout: Duration) -> Self {
        Self {
            registry,
            send_timeout,
        }
    }

    /// Deliver `event` to every registered connection except `exclude`
    ///
    /// Failures never reach the caller: a recipient that is gone or does not
    /// accept the message within the send timeout is logged, deregistered and
    /// skipped, and delivery to the remaining recipients continues.
    pub async fn broadcast(&self, event: &ChatEvent, exclude: Option<ConnectionId>) {
        let line = format!("{}\n", event);

        for peer in self.registry.snapshot() {
            if Some(peer.id) == exclude {
                continue;
            }
            if let Err(err) = self.deliver(&peer, line.clone()).await {
                warn!("dropping {} ({}): {}", peer.name, peer.id, err);
                self.registry.deregister(peer.id);
            }
        }
    }

    /// Hand one complete line to a peer's writer task
    async fn deliver(&self, peer: &PeerHandle, line: String) -> Result<(), DeliveryError> {
        peer.outbound
            .send_timeout(line, self.send_timeout)
            .await
            .map_err(|err| match err {
                SendTimeoutError::Closed(_) => DeliveryError::ChannelClosed,
                SendTimeoutError::Timeout(_) => DeliveryError::TimedOut,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc;

    fn broadcaster_with_registry() -> (Broadcaster, Arc<Registry>) {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry), Duration::from_millis(100));
        (broadcaster, registry)
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_but_excluded() {
        let (broadcaster, registry) = broadcaster_with_registry();

        let sender = ConnectionId::new();
        let other = ConnectionId::new();
        let (sender_tx, mut sender_rx) = mpsc::channel(8);
        let (other_tx, mut other_rx) = mpsc::channel(8);
        registry.register(sender, "sender".into(), sender_tx).unwrap();
        registry.register(other, "other".into(), other_tx).unwrap();

        let event = ChatEvent::message("sender", "hello");
        broadcaster.broadcast(&event, Some(sender)).await;

        assert_eq!(other_rx.recv().await.unwrap(), "sender: hello\n");
        assert!(sender_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_without_exclusion_reaches_everyone() {
        let (broadcaster, registry) = broadcaster_with_registry();

        let a = ConnectionId::new();
        let b = ConnectionId::new();
        let (a_tx, mut a_rx) = mpsc::channel(8);
        let (b_tx, mut b_rx) = mpsc::channel(8);
        registry.register(a, "a".into(), a_tx).unwrap();
        registry.register(b, "b".into(), b_tx).unwrap();

        broadcaster.broadcast(&ChatEvent::joined("c"), None).await;

        assert_eq!(a_rx.recv().await.unwrap(), "c joined the chat\n");
        assert_eq!(b_rx.recv().await.unwrap(), "c joined the chat\n");
    }

    #[tokio::test]
    async fn test_one_dead_recipient_does_not_block_the_rest() {
        let (broadcaster, registry) = broadcaster_with_registry();

        let dead = ConnectionId::new();
        let alive = ConnectionId::new();
        let (dead_tx, dead_rx) = mpsc::channel(8);
        let (alive_tx, mut alive_rx) = mpsc::channel(8);
        registry.register(dead, "dead".into(), dead_tx).unwrap();
        registry.register(alive, "alive".into(), alive_tx).unwrap();
        drop(dead_rx);

        broadcaster.broadcast(&ChatEvent::message("x", "still here"), None).await;

        // the live peer got the message, the dead one was deregistered
        assert_eq!(alive_rx.recv().await.unwrap(), "x: still here\n");
        assert_eq!(registry.len(), 1);
        assert!(registry.name_of(dead).is_none());
    }

    #[tokio::test]
    async fn test_stalled_recipient_is_dropped_after_timeout() {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry), Duration::from_millis(20));

        let stalled = ConnectionId::new();
        let (stalled_tx, mut stalled_rx) = mpsc::channel(1);
        // fill the buffer so the next send cannot complete
        stalled_tx.send("backlog\n".to_string()).await.unwrap();
        registry.register(stalled, "stalled".into(), stalled_tx).unwrap();

        broadcaster.broadcast(&ChatEvent::message("x", "more"), None).await;

        assert!(registry.is_empty());
        // only the pre-filled line ever made it into the channel
        assert_eq!(stalled_rx.recv().await.unwrap(), "backlog\n");
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_registry_is_noop() {
        let (broadcaster, registry) = broadcaster_with_registry();
        broadcaster.broadcast(&ChatEvent::joined("nobody"), None).await;
        assert!(registry.is_empty());
    }
}
