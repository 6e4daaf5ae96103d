use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engines::{chat_messages, ChatMessage, ResponseMessage};
use crate::error::{Result, RoastError};
use crate::mode::Mode;

pub const ENGINE: &str = "OpenAI";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const MAX_TOKENS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl OpenAiConfig {
    /// Explicit values win; otherwise the key comes from `OPENAI_API_KEY`.
    pub fn new(model: Option<String>, api_key: Option<String>, endpoint: Option<String>) -> Self {
        let api_key = api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty());
        Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

pub async fn chat(
    client: &reqwest::Client,
    config: &OpenAiConfig,
    system: Option<&str>,
    prompt: &str,
    mode: Mode,
) -> Result<String> {
    let api_key = config.api_key.as_deref().ok_or(RoastError::MissingApiKey)?;

    let request = ChatRequest {
        model: &config.model,
        messages: chat_messages(system, prompt),
        temperature: mode.temperature(),
        max_tokens: MAX_TOKENS,
    };

    debug!(model = %config.model, endpoint = %config.endpoint, "sending chat completion request");
    let response = client
        .post(&config.endpoint)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .map_err(|source| RoastError::Http { engine: ENGINE, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| RoastError::Http { engine: ENGINE, source })?;

    if !status.is_success() {
        return Err(RoastError::Status {
            engine: ENGINE,
            status,
            body,
        });
    }

    parse_response(&body)
}

/// Pull the first completion's text out of a chat-completions body.
pub fn parse_response(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| RoastError::MalformedResponse {
        engine: ENGINE,
        reason: e.to_string(),
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or_else(|| RoastError::MalformedResponse {
            engine: ENGINE,
            reason: "response contained no choices".into(),
        })
}
