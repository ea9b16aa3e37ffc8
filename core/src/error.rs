//! Error types for the chat client core.
//!
//! # Design
//! Connection establishment failures carry a `ConnectErrorKind` so callers
//! can distinguish a refused port from a handshake that never completed.
//! Everything that goes wrong after the request is on the wire collapses
//! into two cases: the server never produced a byte (`NoResponse`) or the
//! transport went away (`ConnectionClosed`). Mid-read stalls are not modeled
//! separately; a peer that stops talking looks the same as a peer that hung
//! up, and the caller's outer loop decides whether to try again.

use std::fmt;

/// Why establishing the transport failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// The peer actively refused the connection.
    Refused,

    /// The connect attempt did not complete within its deadline.
    Timeout,

    /// The encrypted channel could not be negotiated.
    TlsHandshakeFailed,
}

/// Errors returned by `ChatClient::send` and the response reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The transport could not be established.
    Connect(ConnectErrorKind),

    /// No response byte arrived within the configured deadline.
    NoResponse,

    /// The transport failed or was closed by the peer before the exchange
    /// completed. Not distinguished from a normal peer close.
    ConnectionClosed,

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ConnectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectErrorKind::Refused => write!(f, "connection refused"),
            ConnectErrorKind::Timeout => write!(f, "connect timed out"),
            ConnectErrorKind::TlsHandshakeFailed => write!(f, "TLS handshake failed"),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Connect(kind) => write!(f, "connect failed: {kind}"),
            ClientError::NoResponse => write!(f, "no response received within deadline"),
            ClientError::ConnectionClosed => write!(f, "connection closed"),
            ClientError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}
