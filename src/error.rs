//! Error types for the chat relay
//!
//! Defines application-level errors plus the focused registry and delivery
//! errors. Uses thiserror for ergonomic error definitions.
//!
//! Connection-level failures never cross a worker boundary: a read or write
//! error ends the owning worker only, and a per-recipient delivery failure is
//! absorbed inside the broadcaster (the recipient is dropped, the broadcast
//! continues).

use thiserror::Error;

use crate::types::ConnectionId;

/// Application-level errors
///
/// Covers fatal errors of the binaries and fallible entry points. A worker
/// returning one of these terminates that worker only; an error out of the
/// accept loop terminates the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal to the owning worker or binary)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config file parsed but holds unusable values
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Registry rejected an operation (worker lifecycle bug)
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The handle is already registered. Indicates a listener/worker
    /// lifecycle bug; fatal to the registering worker only.
    #[error("connection {0} is already registered")]
    DuplicateHandle(ConnectionId),
}

/// Per-recipient delivery errors during a broadcast
///
/// Either way the recipient is deregistered and the broadcast moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The recipient's outbound channel is closed (writer task gone)
    #[error("outbound channel closed")]
    ChannelClosed,

    /// The recipient did not accept the message within the send timeout
    #[error("send timed out")]
    TimedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_handle_names_the_connection() {
        let id = ConnectionId::new();
        let err = RegistryError::DuplicateHandle(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
