use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

#[derive(Serialize)]
pub(crate) struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: String,
}

impl ChatRequest {
    /// Single-user-message request at temperature 0, the shape every scout
    /// operation uses.
    pub(crate) fn user_prompt(model: &str, content: String) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![Message { role: "user".to_owned(), content }],
            temperature: 0.0,
        }
    }
}
