//! Streaming response reader.
//!
//! # Design
//! A small state machine driven by cooperative polling: the only place the
//! reader suspends is a short sleep between availability checks, so a host
//! sharing one thread with other periodic duties is never blocked inside an
//! OS read. The timeout contract is deliberately narrow: exactly one
//! transition to `TimedOut` when zero bytes arrive within the deadline, and
//! once the first byte is in, the deadline no longer applies.
//!
//! Header lines are detected but not interpreted: a lone `"\r"` line ends
//! the block and everything before it is discarded. Body completion is
//! signaled by the transport closing, never by Content-Length; a server that
//! keeps the connection open after a fixed-length body keeps the reader in
//! `ReadingBody`. Both behaviors are inherited from the reference device and
//! preserved on purpose.
//!
//! There is no bound on header line length; see the notes in DESIGN.md.

use std::time::{Duration, Instant};

use crate::error::ClientError;
use crate::sink::{StatusEvent, StatusSink};
use crate::transport::Transport;

/// Reader phases, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    AwaitingFirstByte,
    ReadingHeaders,
    ReadingBody,
    Done,
    TimedOut,
}

/// Consumes one HTTP response from a transport, streaming the body to a
/// status sink and accumulating it for the caller.
#[derive(Debug)]
pub struct ResponseReader {
    state: ReaderState,
    response_timeout: Duration,
    poll_interval: Duration,
}

impl ResponseReader {
    pub fn new(response_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            state: ReaderState::AwaitingFirstByte,
            response_timeout,
            poll_interval,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Run the state machine to a terminal state. Returns the accumulated
    /// body bytes, or `NoResponse` if the deadline elapsed with no data.
    ///
    /// The transport is left open; the owning connection releases it.
    pub fn read<T, S>(&mut self, transport: &mut T, sink: &mut S) -> Result<Vec<u8>, ClientError>
    where
        T: Transport,
        S: StatusSink,
    {
        if !self.await_first_byte(transport) {
            self.state = ReaderState::TimedOut;
            sink.report(StatusEvent::TimedOut);
            return Err(ClientError::NoResponse);
        }

        self.state = ReaderState::ReadingHeaders;
        self.skip_headers(transport);
        sink.report(StatusEvent::HeaderParsed);

        self.state = ReaderState::ReadingBody;
        let body = self.stream_body(transport, sink);
        self.state = ReaderState::Done;
        Ok(body)
    }

    /// Poll for the first available byte until the deadline. True if data
    /// arrived in time.
    fn await_first_byte<T: Transport>(&self, transport: &mut T) -> bool {
        let deadline = Instant::now() + self.response_timeout;
        while !transport.available() {
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(self.poll_interval);
        }
        true
    }

    /// Read header lines until the blank-line terminator. Lines are
    /// discarded; only the terminator matters.
    fn skip_headers<T: Transport>(&self, transport: &mut T) {
        while transport.connected() {
            let line = self.read_line(transport);
            if line == "\r" {
                break;
            }
        }
    }

    /// One line up to and excluding `\n`. Returns what was gathered so far
    /// if the peer closes mid-line.
    fn read_line<T: Transport>(&self, transport: &mut T) -> String {
        let mut line = Vec::new();
        loop {
            match transport.read_byte() {
                Some(b'\n') => break,
                Some(b) => line.push(b),
                None => {
                    if !transport.connected() {
                        break;
                    }
                    std::thread::sleep(self.poll_interval);
                }
            }
        }
        String::from_utf8_lossy(&line).into_owned()
    }

    /// Forward body bytes to the sink as they arrive until the peer closes.
    fn stream_body<T, S>(&self, transport: &mut T, sink: &mut S) -> Vec<u8>
    where
        T: Transport,
        S: StatusSink,
    {
        let mut body = Vec::new();
        loop {
            match transport.read_byte() {
                Some(b) => {
                    sink.report(StatusEvent::BodyChunk(vec![b]));
                    body.push(b);
                }
                None => {
                    if !transport.connected() {
                        break;
                    }
                    std::thread::sleep(self.poll_interval);
                }
            }
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    fn reader(timeout_ms: u64) -> ResponseReader {
        ResponseReader::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(1),
        )
    }

    /// Sink that records every event for later assertions.
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<StatusEvent>,
    }

    impl StatusSink for RecordingSink {
        fn report(&mut self, event: StatusEvent) {
            self.events.push(event.clone());
        }
    }

    impl RecordingSink {
        fn body(&self) -> Vec<u8> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    StatusEvent::BodyChunk(bytes) => Some(bytes.clone()),
                    _ => None,
                })
                .flatten()
                .collect()
        }
    }

    #[test]
    fn splits_headers_from_body() {
        let mut transport = MemoryTransport::new(b"HTTP/1.1 200 OK\r\n\r\nhello");
        let mut sink = RecordingSink::default();
        let body = reader(100).read(&mut transport, &mut sink).unwrap();
        assert_eq!(body, b"hello");
        assert_eq!(sink.body(), b"hello");
    }

    #[test]
    fn terminates_header_block_regardless_of_header_count() {
        for n in 0..4 {
            let mut wire = b"HTTP/1.1 200 OK\r\n".to_vec();
            for i in 0..n {
                wire.extend_from_slice(format!("X-Header-{i}: v\r\n").as_bytes());
            }
            wire.extend_from_slice(b"\r\nbody");
            let mut transport = MemoryTransport::new(&wire);
            let mut sink = RecordingSink::default();
            let body = reader(100).read(&mut transport, &mut sink).unwrap();
            assert_eq!(body, b"body", "with {n} headers");
        }
    }

    #[test]
    fn silent_peer_times_out_without_reading_headers() {
        let mut transport = MemoryTransport::silent();
        let mut sink = RecordingSink::default();
        let mut r = reader(20);
        let err = r.read(&mut transport, &mut sink).unwrap_err();
        assert_eq!(err, ClientError::NoResponse);
        assert_eq!(r.state(), ReaderState::TimedOut);
        assert_eq!(sink.events, vec![StatusEvent::TimedOut]);
        assert!(!sink.events.contains(&StatusEvent::HeaderParsed));
    }

    #[test]
    fn timeout_is_reported_exactly_once() {
        let mut transport = MemoryTransport::silent();
        let mut sink = RecordingSink::default();
        let _ = reader(20).read(&mut transport, &mut sink);
        let timeouts = sink
            .events
            .iter()
            .filter(|e| **e == StatusEvent::TimedOut)
            .count();
        assert_eq!(timeouts, 1);
    }

    #[test]
    fn body_bytes_reach_sink_in_arrival_order() {
        let mut transport = MemoryTransport::new(b"HTTP/1.1 200 OK\r\nX: y\r\n\r\nabcdef");
        let mut sink = RecordingSink::default();
        let body = reader(100).read(&mut transport, &mut sink).unwrap();
        assert_eq!(sink.body(), body);
        assert_eq!(body, b"abcdef");
    }

    #[test]
    fn header_parsed_event_precedes_body_chunks() {
        let mut transport = MemoryTransport::new(b"HTTP/1.1 200 OK\r\n\r\nz");
        let mut sink = RecordingSink::default();
        reader(100).read(&mut transport, &mut sink).unwrap();
        assert_eq!(sink.events[0], StatusEvent::HeaderParsed);
        assert_eq!(sink.events[1], StatusEvent::BodyChunk(vec![b'z']));
    }

    #[test]
    fn empty_body_yields_no_chunks() {
        let mut transport = MemoryTransport::new(b"HTTP/1.1 204 No Content\r\n\r\n");
        let mut sink = RecordingSink::default();
        let body = reader(100).read(&mut transport, &mut sink).unwrap();
        assert!(body.is_empty());
        assert_eq!(sink.events, vec![StatusEvent::HeaderParsed]);
    }

    #[test]
    fn reaches_done_on_normal_completion() {
        let mut transport = MemoryTransport::new(b"HTTP/1.1 200 OK\r\n\r\nok");
        let mut sink = RecordingSink::default();
        let mut r = reader(100);
        r.read(&mut transport, &mut sink).unwrap();
        assert_eq!(r.state(), ReaderState::Done);
    }
}
