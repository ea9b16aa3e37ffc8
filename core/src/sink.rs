//! Status sink: fire-and-forget progress reporting.
//!
//! # Design
//! The core never waits on a sink and a sink can never fail; `report` takes
//! `&mut self` and returns nothing. Body bytes are forwarded one at a time,
//! immediately on arrival, so a sink that renders to a display can show the
//! response as it streams in rather than after the connection closes.

use crate::providers::DisplayPanel;

/// Progress events emitted over one request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Transport established, request about to be written.
    ConnectionStarted,

    /// The full request (headers and body) is on the wire.
    RequestSent,

    /// The blank line ending the response header block was seen.
    HeaderParsed,

    /// Body bytes, forwarded in arrival order.
    BodyChunk(Vec<u8>),

    /// No byte arrived within the first-byte deadline.
    NoResponse,

    /// The reader reached its terminal timeout state.
    TimedOut,

    /// The transport has been released.
    Closed,
}

/// Receiver of progress events. Implementations must be non-blocking; the
/// core treats every call as fire-and-forget.
pub trait StatusSink {
    fn report(&mut self, event: StatusEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn report(&mut self, _event: StatusEvent) {}
}

/// Sink that forwards events to `tracing`.
///
/// Lifecycle events log at info, timeouts at warn, and individual body bytes
/// at trace so a default subscriber is not flooded by streaming output.
#[derive(Debug, Default)]
pub struct TraceSink;

impl StatusSink for TraceSink {
    fn report(&mut self, event: StatusEvent) {
        match event {
            StatusEvent::ConnectionStarted => tracing::info!("connection started"),
            StatusEvent::RequestSent => tracing::info!("request sent, waiting for response"),
            StatusEvent::HeaderParsed => tracing::info!("headers received"),
            StatusEvent::BodyChunk(bytes) => {
                tracing::trace!(len = bytes.len(), "body chunk")
            }
            StatusEvent::NoResponse => tracing::warn!("no response from server"),
            StatusEvent::TimedOut => tracing::warn!("response deadline elapsed"),
            StatusEvent::Closed => tracing::info!("connection closed"),
        }
    }
}

/// Sink that renders progress onto a [`DisplayPanel`].
///
/// Lifecycle events replace the screen with a short status string. Body
/// bytes are drawn at a running cursor; a newline advances the line counter,
/// mirroring how the reference device laid out streamed text.
pub struct DisplaySink<'a, D: DisplayPanel> {
    display: &'a mut D,
    line: i32,
    column: i32,
    line_height: i32,
    streaming: bool,
}

impl<'a, D: DisplayPanel> DisplaySink<'a, D> {
    pub fn new(display: &'a mut D, line_height: i32) -> Self {
        Self {
            display,
            line: 0,
            column: 0,
            line_height,
            streaming: false,
        }
    }

    fn show_status(&mut self, text: &str) {
        self.streaming = false;
        self.display.clear();
        self.display.draw_text(0, 0, text);
        self.display.present();
    }

    fn draw_body(&mut self, bytes: &[u8]) {
        if !self.streaming {
            // First body byte: switch the screen over to response layout.
            self.display.clear();
            self.display.draw_text(0, 0, "Response:");
            self.line = 1;
            self.column = 0;
            self.streaming = true;
        }
        for &b in bytes {
            if b == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                let text = (b as char).to_string();
                self.display
                    .draw_text(self.column, self.line * self.line_height, &text);
                self.column += 1;
            }
        }
    }

    /// Current (line, column) cursor, in character cells.
    pub fn cursor(&self) -> (i32, i32) {
        (self.line, self.column)
    }
}

impl<D: DisplayPanel> StatusSink for DisplaySink<'_, D> {
    fn report(&mut self, event: StatusEvent) {
        match event {
            StatusEvent::ConnectionStarted => self.show_status("Server Connected!"),
            StatusEvent::RequestSent => self.show_status("Request Sent"),
            StatusEvent::HeaderParsed => {}
            StatusEvent::BodyChunk(bytes) => self.draw_body(&bytes),
            StatusEvent::NoResponse => self.show_status("No Response"),
            StatusEvent::TimedOut => {}
            StatusEvent::Closed => {
                if self.streaming {
                    self.display.present();
                }
            }
        }
    }
}
