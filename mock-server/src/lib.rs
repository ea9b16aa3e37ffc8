use axum::{http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Completion {
    pub id: String,
    pub object: String,
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: CompletionMessage,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

pub fn app() -> Router {
    Router::new().route("/chat/completions", post(chat_completions))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn chat_completions(
    Json(input): Json<ChatRequest>,
) -> Result<Json<Completion>, StatusCode> {
    if input.messages.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let completion = Completion {
        id: format!("chatcmpl-{}", Uuid::new_v4()),
        object: "chat.completion".to_string(),
        choices: vec![Choice {
            index: 0,
            message: CompletionMessage {
                role: "assistant".to_string(),
                content: "Why do programmers prefer dark mode? Because light attracts bugs."
                    .to_string(),
            },
        }],
    };
    Ok(Json(completion))
}
