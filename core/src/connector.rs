//! Connection establishment.
//!
//! The connector owns the "get me a transport to (host, port)" step and
//! nothing else: no retry, no backoff. On failure it reports why and hands
//! control back; the caller's outer loop decides whether to try again.
//! Hosts with a TLS stack supply their own connector that performs the
//! handshake and maps its failures to `TlsHandshakeFailed`.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{ClientError, ConnectErrorKind};
use crate::transport::{TcpTransport, Transport};

/// Establishes the transport for one request/response cycle.
pub trait Connector {
    type Transport: Transport;

    fn connect(&self, host: &str, port: u16) -> Result<Self::Transport, ClientError>;
}

/// Plain-TCP connector over `std::net`.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    connect_timeout: Duration,
}

impl TcpConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Connector for TcpConnector {
    type Transport = TcpTransport;

    fn connect(&self, host: &str, port: u16) -> Result<TcpTransport, ClientError> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|_| ClientError::Connect(ConnectErrorKind::Refused))?
            .next()
            .ok_or(ClientError::Connect(ConnectErrorKind::Refused))?;

        let stream = TcpStream::connect_timeout(&addr, self.connect_timeout)
            .map_err(|e| ClientError::Connect(classify(&e)))?;
        TcpTransport::new(stream).map_err(|e| ClientError::Connect(classify(&e)))
    }
}

fn classify(e: &io::Error) -> ConnectErrorKind {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ConnectErrorKind::Timeout,
        _ => ConnectErrorKind::Refused,
    }
}
