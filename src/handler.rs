//! Per-connection worker
//!
//! Owns one accepted connection for its whole lifetime: register under a
//! fresh display name, announce the join, relay incoming lines, announce the
//! departure and deregister.
//!
//! The socket is split. The read half is consumed here in a blocking line
//! loop; the write half moves into a dedicated writer task that drains the
//! connection's outbound channel. That task is the only writer on the socket
//! and closes it exactly once, when the channel closes. The channel closes
//! after the registry entry is dropped by whichever cleanup path runs first.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::broadcast::Broadcaster;
use crate::error::AppError;
use crate::message::ChatEvent;
use crate::names::NameGenerator;
use crate::registry::Registry;
use crate::types::ConnectionId;

/// Handle one accepted connection
///
/// Runs until the peer disconnects or the transport fails; both end the
/// worker the same way. Returns an error only for worker-fatal conditions
/// (a duplicate handle at registration).
pub async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    registry: Arc<Registry>,
    broadcaster: Broadcaster,
    names: NameGenerator,
    outbound_buffer: usize,
) -> Result<(), AppError> {
    let id = ConnectionId::new();
    let name = names.generate();

    let (read_half, mut write_half) = stream.into_split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(outbound_buffer);

    // Sole writer on this socket. Ends once every sender on the channel is
    // dropped, then closes the connection.
    let writer = tokio::spawn(async move {
        while let Some(line) = outbound_rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                debug!("write failed, ending writer task");
                break;
            }
        }
        let _ = write_half.shutdown().await;
    });

    registry.register(id, name.clone(), outbound_tx)?;

    info!("[+] {} connected from {}", name, peer_addr);
    broadcaster.broadcast(&ChatEvent::joined(&name), Some(id)).await;

    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let event = ChatEvent::message(&name, line.trim());
                info!("{}", event);
                broadcaster.broadcast(&event, Some(id)).await;
            }
            // zero-byte read: peer closed cleanly
            Ok(None) => break,
            Err(err) => {
                warn!("[!] transport error for {}: {}", name, err);
                break;
            }
        }
    }

    registry.deregister(id);
    info!("[-] {} disconnected", name);
    broadcaster.broadcast(&ChatEvent::left(&name), Some(id)).await;

    // Our registry entry is gone, so the writer drains and closes the socket.
    let _ = writer.await;

    Ok(())
}
