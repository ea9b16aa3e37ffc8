//! Chat payload DTOs.
//!
//! # Design
//! These types only shape the *request* body. The response reader streams
//! bytes without interpreting them, so no response DTO exists in the core;
//! the mock-server crate defines its own completion schema independently and
//! integration tests catch drift between the two.

use serde::Serialize;

use crate::error::ClientError;

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request payload for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// A single-turn conversation with one user message.
    pub fn user(content: &str) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: content.to_string(),
            }],
        }
    }

    pub fn to_json(&self) -> Result<String, ClientError> {
        serde_json::to_string(self).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_request_serializes_to_expected_shape() {
        let json = ChatRequest::user("Tell me a joke!").to_json().unwrap();
        assert_eq!(
            json,
            r#"{"messages":[{"role":"user","content":"Tell me a joke!"}]}"#
        );
    }

    #[test]
    fn field_order_is_role_then_content() {
        let json = serde_json::to_string(&ChatMessage {
            role: "assistant".to_string(),
            content: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
