//! Transport seam: the established byte stream the core reads and writes.
//!
//! # Design
//! The core never opens sockets or negotiates TLS itself; it is handed a
//! `Transport` that is already connected (host-does-IO at the stream level).
//! The trait mirrors the poll-style client API the core's state machine is
//! built around: `available` answers "is there a byte right now", `connected`
//! stays true until peer close has been observed *and* buffered bytes are
//! drained, and `close` releases the stream.
//!
//! Two implementations ship with the crate: `TcpTransport` over a
//! non-blocking `TcpStream` for real exchanges, and `MemoryTransport` with
//! scripted response bytes for tests and hosts without a network.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

/// An established, bidirectional byte stream.
pub trait Transport {
    /// Write the whole buffer to the peer.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Whether at least one byte can be read without blocking.
    fn available(&mut self) -> bool;

    /// False once the peer has closed and no buffered bytes remain.
    fn connected(&self) -> bool;

    /// Next byte, if one is available right now.
    fn read_byte(&mut self) -> Option<u8>;

    /// Release the stream. Safe to call more than once.
    fn close(&mut self);
}

/// `Transport` over a non-blocking TCP stream.
///
/// Reads are drained into an internal buffer so `available` and `read_byte`
/// never block; a zero-length read marks the peer close.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    buffer: VecDeque<u8>,
    peer_closed: bool,
    closed: bool,
}

impl TcpTransport {
    /// Wrap an already-connected stream. Switches it to non-blocking mode.
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        Ok(Self {
            stream,
            buffer: VecDeque::new(),
            peer_closed: false,
            closed: false,
        })
    }

    /// Pull whatever the socket has into the internal buffer.
    fn fill(&mut self) {
        if self.peer_closed || self.closed {
            return;
        }
        let mut scratch = [0_u8; 1024];
        loop {
            match self.stream.read(&mut scratch) {
                Ok(0) => {
                    self.peer_closed = true;
                    return;
                }
                Ok(n) => self.buffer.extend(&scratch[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => {
                    // I/O failure is treated as a peer close.
                    self.peer_closed = true;
                    return;
                }
            }
        }
    }
}

impl Transport for TcpTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut remaining = bytes;
        while !remaining.is_empty() {
            match self.stream.write(remaining) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => remaining = &remaining[n..],
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    // Send buffer full; requests are small, so yield briefly.
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn available(&mut self) -> bool {
        if self.buffer.is_empty() {
            self.fill();
        }
        !self.buffer.is_empty()
    }

    fn connected(&self) -> bool {
        !self.closed && (!self.peer_closed || !self.buffer.is_empty())
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.buffer.is_empty() {
            self.fill();
        }
        self.buffer.pop_front()
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.stream.shutdown(Shutdown::Both);
        }
    }
}

/// Scripted in-memory transport for tests.
///
/// Yields a canned byte sequence, then (by default) reports the peer as
/// closed once the script is drained. `silent()` builds a peer that stays
/// connected but never produces a byte, for exercising the first-byte
/// deadline.
#[derive(Debug)]
pub struct MemoryTransport {
    incoming: VecDeque<u8>,
    written: Vec<u8>,
    close_after_script: bool,
    closed: bool,
    close_count: u32,
}

impl MemoryTransport {
    /// Peer that answers with `response` and then closes.
    pub fn new(response: &[u8]) -> Self {
        Self {
            incoming: response.iter().copied().collect(),
            written: Vec::new(),
            close_after_script: true,
            closed: false,
            close_count: 0,
        }
    }

    /// Peer that stays connected but never sends anything.
    pub fn silent() -> Self {
        Self {
            incoming: VecDeque::new(),
            written: Vec::new(),
            close_after_script: false,
            closed: false,
            close_count: 0,
        }
    }

    /// Everything the core wrote onto the transport.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// How many times `close` has been called.
    pub fn close_count(&self) -> u32 {
        self.close_count
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.closed {
            return Err(io::ErrorKind::NotConnected.into());
        }
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn available(&mut self) -> bool {
        !self.closed && !self.incoming.is_empty()
    }

    fn connected(&self) -> bool {
        if self.closed {
            return false;
        }
        !self.close_after_script || !self.incoming.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.closed {
            return None;
        }
        self.incoming.pop_front()
    }

    fn close(&mut self) {
        self.close_count += 1;
        self.closed = true;
    }
}
