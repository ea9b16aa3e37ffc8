//! HTTP request construction.
//!
//! # Design
//! The request is plain data and `encode` is pure; nothing here touches the
//! transport. The method is fixed to POST and the header order is fixed
//! (Host, Content-Type, Content-Length, Connection), matching the wire
//! format the reference device emitted. `Connection: close` is load-bearing:
//! the response reader treats peer close as end-of-body.

/// A chat-completions POST request as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub host: String,
    pub path: String,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(host: &str, path: &str, body: &[u8]) -> Self {
        Self {
            host: host.to_string(),
            path: path.to_string(),
            body: body.to_vec(),
        }
    }

    /// Serialize to wire bytes: request line, the four fixed headers, a
    /// blank line, then the raw body. Content-Length is always the exact
    /// byte length of the body.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128 + self.body.len());
        out.extend_from_slice(format!("POST {} HTTP/1.1\r\n", self.path).as_bytes());
        out.extend_from_slice(format!("Host: {}\r\n", self.host).as_bytes());
        out.extend_from_slice(b"Content-Type: application/json\r\n");
        out.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        out.extend_from_slice(b"Connection: close\r\n");
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out
    }
}
