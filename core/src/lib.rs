//! Streaming HTTP client core for a chat-completions endpoint.
//!
//! # Overview
//! Serializes a POST request onto an established byte stream, waits a
//! bounded time for the first response byte, splits headers from body, and
//! streams the body byte-by-byte to a status sink until the peer closes the
//! connection. Built for hosts with one thread of control: the only
//! suspension point is a short sleep inside a cooperative poll loop.
//!
//! # Design
//! - The core never opens sockets or negotiates TLS; a `Connector` hands it
//!   an already-established `Transport`.
//! - `Request` is plain data with a pure `encode`; the `ResponseReader` is
//!   an explicit state machine with an observable state.
//! - Progress flows through a fire-and-forget `StatusSink`; the core never
//!   waits on a sink.
//! - The transport is closed exactly once per request cycle on every exit
//!   path, with a drop guard covering unwinding.
//! - Response completion is signaled by the peer closing the connection,
//!   not by Content-Length, and header lines are detected but never parsed.

pub mod client;
pub mod config;
pub mod connector;
pub mod device;
pub mod error;
pub mod providers;
pub mod reader;
pub mod request;
pub mod sink;
pub mod transport;
pub mod types;

pub use client::{ChatClient, Connection};
pub use config::ClientConfig;
pub use connector::{Connector, TcpConnector};
pub use device::{CycleOutcome, Device, DeviceError};
pub use error::{ClientError, ConnectErrorKind};
pub use reader::{ReaderState, ResponseReader};
pub use request::Request;
pub use sink::{DisplaySink, NullSink, StatusEvent, StatusSink, TraceSink};
pub use transport::{MemoryTransport, TcpTransport, Transport};
pub use types::{ChatMessage, ChatRequest};
