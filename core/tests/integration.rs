//! End-to-end exchange against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a real request
//! through `TcpConnector` / `TcpTransport` and the streaming reader. A
//! second scenario dials a raw listener that accepts and never answers, to
//! exercise the first-byte deadline over a real socket.

use std::time::Duration;

use chat_core::{
    ChatClient, ChatRequest, ClientConfig, ClientError, StatusEvent, StatusSink, TcpConnector,
};

#[derive(Default)]
struct RecordingSink {
    events: Vec<StatusEvent>,
}

impl StatusSink for RecordingSink {
    fn report(&mut self, event: StatusEvent) {
        self.events.push(event);
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

    fn contains(&self, event: &StatusEvent) -> bool {
        self.events.contains(event)
    }
}

/// Start the mock server on a random port and return its port.
fn spawn_mock_server() -> u16 {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = std_listener.local_addr().unwrap().port();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    port
}

fn client(port: u16, response_timeout: Duration) -> ChatClient<TcpConnector> {
    let config = ClientConfig {
        host: "127.0.0.1".to_string(),
        port,
        response_timeout,
        poll_interval: Duration::from_millis(1),
        ..ClientConfig::default()
    };
    ChatClient::new(config, TcpConnector::new(Duration::from_millis(500)))
}

#[test]
fn chat_exchange_streams_completion_body() {
    let port = spawn_mock_server();
    let client = client(port, Duration::from_secs(5));
    let mut sink = RecordingSink::default();

    let body = client
        .send_chat(&ChatRequest::user("Tell me a joke!"), &mut sink)
        .unwrap();

    // The reader hands back the raw body, which is the completion JSON.
    let completion: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(completion["object"], "chat.completion");
    assert_eq!(completion["choices"][0]["message"]["role"], "assistant");

    // Lifecycle events arrive in order, and every body byte reached the sink.
    assert_eq!(sink.events[0], StatusEvent::ConnectionStarted);
    assert_eq!(sink.events[1], StatusEvent::RequestSent);
    assert_eq!(sink.events[2], StatusEvent::HeaderParsed);
    assert_eq!(sink.events.last(), Some(&StatusEvent::Closed));
    assert_eq!(sink.body(), body);
}

#[test]
fn silent_server_times_out_with_no_response() {
    // A listener that accepts the connection and never writes a byte.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        // Hold the socket open well past the client deadline.
        std::thread::sleep(Duration::from_secs(2));
        drop(stream);
    });

    let client = client(port, Duration::from_millis(100));
    let mut sink = RecordingSink::default();
    let err = client
        .send_chat(&ChatRequest::user("hello?"), &mut sink)
        .unwrap_err();

    assert_eq!(err, ClientError::NoResponse);
    assert!(sink.contains(&StatusEvent::TimedOut));
    assert!(sink.contains(&StatusEvent::NoResponse));
    assert!(sink.contains(&StatusEvent::Closed));
    assert!(!sink.contains(&StatusEvent::HeaderParsed));
}

#[test]
fn refused_connection_surfaces_connect_error() {
    // Learn a free port, then close the listener before dialing it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = client(port, Duration::from_millis(100));
    let mut sink = RecordingSink::default();
    let err = client
        .send_chat(&ChatRequest::user("anyone?"), &mut sink)
        .unwrap_err();

    assert!(matches!(err, ClientError::Connect(_)));
    assert!(sink.events.is_empty());
}
