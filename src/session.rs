//! Client session
//!
//! One connection, two concurrent paths: the receive path prints everything
//! the server relays, the send path forwards local input lines. Either path
//! stopping ends the session; the other is not forcibly joined and stops on
//! its own once the connection is closed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::AppError;

/// Local input line that ends the session instead of being sent
pub const QUIT_COMMAND: &str = "quit";

/// Whether a local input line is the exit command (case-insensitive)
pub fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(QUIT_COMMAND)
}

/// Connect to the server and run both paths until one stops
pub async fn run(addr: &str) -> Result<(), AppError> {
    let stream = TcpStream::connect(addr).await?;
    println!("Connected to chat server {}", addr);
    println!("Type messages and press Enter. Type 'quit' to exit.\n");

    let (read_half, write_half) = stream.into_split();

    tokio::spawn(receive_loop(read_half, tokio::io::stdout()));
    send_loop(BufReader::new(tokio::io::stdin()), write_half).await;

    Ok(())
}

/// Receive path: print each relayed line until the server goes away
///
/// A clean close and a transport error end the path the same way, with a
/// disconnection notice on the output.
pub async fn receive_loop<R, W>(reader: R, mut out: W)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let shown = format!("{}\n", line.trim_end());
                if out.write_all(shown.as_bytes()).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                let _ = out.write_all(b"Disconnected from server\n").await;
                break;
            }
            Err(err) => {
                debug!("receive path error: {}", err);
                let _ = out.write_all(b"Disconnected from server\n").await;
                break;
            }
        }
    }
}

/// Send path: forward local input lines to the connection
///
/// `quit` (case-insensitive) closes the connection and stops without being
/// sent; input EOF stops the path; a write error stops it silently.
pub async fn send_loop<I, W>(input: I, mut conn: W)
where
    I: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if is_quit(&line) {
            let _ = conn.shutdown().await;
            break;
        }
        let framed = format!("{}\n", line);
        if conn.write_all(framed.as_bytes()).await.is_err() {
            break;
        }
    }
}
