//! Request/response orchestration.
//!
//! # Design
//! `ChatClient` is the explicit application context: it owns the config and
//! the connector, replacing the fixed globals of the reference device. One
//! call to `send` runs exactly one request/response cycle on one transport —
//! no pipelining, enforced by construction because the transport is moved
//! into the `Connection` and consumed by it.
//!
//! The transport release is a guaranteed obligation, not best-effort: every
//! exit path (normal completion, no-response, write failure) closes exactly
//! once and emits `Closed`, and a drop guard covers unwinding.

use crate::config::ClientConfig;
use crate::connector::Connector;
use crate::error::ClientError;
use crate::reader::ResponseReader;
use crate::request::Request;
use crate::sink::{StatusEvent, StatusSink};
use crate::transport::Transport;
use crate::types::ChatRequest;

/// Client for a chat-completions endpoint over a byte-stream transport.
#[derive(Debug, Clone)]
pub struct ChatClient<C: Connector> {
    config: ClientConfig,
    connector: C,
}

impl<C: Connector> ChatClient<C> {
    pub fn new(config: ClientConfig, connector: C) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Serialize `prompt` and POST it to `/chat/completions`, returning the
    /// raw response body.
    pub fn send_chat<S: StatusSink>(
        &self,
        prompt: &ChatRequest,
        sink: &mut S,
    ) -> Result<Vec<u8>, ClientError> {
        let body = prompt.to_json()?;
        self.send("/chat/completions", body.as_bytes(), sink)
    }

    /// POST `body` to `path` and stream the response through `sink`.
    pub fn send<S: StatusSink>(
        &self,
        path: &str,
        body: &[u8],
        sink: &mut S,
    ) -> Result<Vec<u8>, ClientError> {
        let transport = self
            .connector
            .connect(&self.config.host, self.config.port)?;
        sink.report(StatusEvent::ConnectionStarted);
        let request = Request::new(&self.config.host, path, body);
        Connection::new(transport).execute(&request, &self.config, sink)
    }
}

/// One transport, one request/response cycle.
///
/// Owns the transport for the duration of the cycle and guarantees it is
/// closed exactly once on every exit path.
pub struct Connection<T: Transport> {
    transport: T,
    closed: bool,
}

impl<T: Transport> Connection<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            closed: false,
        }
    }

    /// Write the request and read the response to completion. Consumes the
    /// connection; a new request needs a new transport.
    pub fn execute<S: StatusSink>(
        mut self,
        request: &Request,
        config: &ClientConfig,
        sink: &mut S,
    ) -> Result<Vec<u8>, ClientError> {
        if self.transport.write_all(&request.encode()).is_err() {
            self.close(sink);
            return Err(ClientError::ConnectionClosed);
        }
        sink.report(StatusEvent::RequestSent);

        let mut reader = ResponseReader::new(config.response_timeout, config.poll_interval);
        let result = reader.read(&mut self.transport, sink);
        if result == Err(ClientError::NoResponse) {
            sink.report(StatusEvent::NoResponse);
        }
        self.close(sink);
        result
    }

    fn close(&mut self, sink: &mut impl StatusSink) {
        if !self.closed {
            self.closed = true;
            self.transport.close();
            sink.report(StatusEvent::Closed);
        }
    }
}

impl<T: Transport> Drop for Connection<T> {
    fn drop(&mut self) {
        // Covers unwinding and early drops; the normal paths close via
        // `close` and set the flag first.
        if !self.closed {
            self.transport.close();
        }
    }
}
