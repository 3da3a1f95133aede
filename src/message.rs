//! Chat event wire forms
//!
//! The wire protocol is plain newline-delimited text; each event renders to
//! exactly one line. `Display` produces the line body without the trailing
//! newline; the broadcaster appends it so every recipient gets the whole
//! message in a single write.

use std::fmt;

/// One relayable chat event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A client joined the chat
    Joined { name: String },
    /// A client left the chat
    Left { name: String },
    /// A chat line from one client
    Message { from: String, text: String },
}

impl ChatEvent {
    /// Join announcement for `name`
    pub fn joined(name: impl Into<String>) -> Self {
        Self::Joined { name: name.into() }
    }

    /// Departure announcement for `name`
    pub fn left(name: impl Into<String>) -> Self {
        Self::Left { name: name.into() }
    }

    /// Chat line `from: text`
    pub fn message(from: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message {
            from: from.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined { name } => write!(f, "{} joined the chat", name),
            Self::Left { name } => write!(f, "[-] {} left the chat.", name),
            Self::Message { from, text } => write!(f, "{}: {}", from, text),
        }
    }
}
