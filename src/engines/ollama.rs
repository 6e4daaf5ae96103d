use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engines::{chat_messages, ChatMessage, ResponseMessage};
use crate::error::{Result, RoastError};
use crate::mode::Mode;

pub const ENGINE: &str = "Ollama";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2";
pub const INSTALL_HINT: &str = "Install and start Ollama: https://ollama.ai";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    pub model: String,
    pub base_url: String,
}

impl OllamaConfig {
    pub fn new(model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn chat_url(&self) -> String {
        self.url("/api/chat")
    }

    pub fn tags_url(&self) -> String {
        self.url("/api/tags")
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

pub async fn chat(
    client: &reqwest::Client,
    config: &OllamaConfig,
    system: Option<&str>,
    prompt: &str,
    mode: Mode,
) -> Result<String> {
    let request = ChatRequest {
        model: &config.model,
        messages: chat_messages(system, prompt),
        stream: false,
        options: ChatOptions {
            temperature: mode.temperature(),
        },
    };

    let url = config.chat_url();
    debug!(model = %config.model, %url, "sending local chat request");
    let response = client
        .post(&url)
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

pub fn parse_response(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| RoastError::MalformedResponse {
        engine: ENGINE,
        reason: e.to_string(),
    })?;
    Ok(parsed.message.content.trim().to_string())
}

/// True when the local service answers its tag listing.
pub async fn probe(client: &reqwest::Client, config: &OllamaConfig) -> bool {
    let url = config.tags_url();
    match client.get(&url).send().await {
        Ok(response) => {
            debug!(%url, status = %response.status(), "probed local model service");
            response.status().is_success()
        }
        Err(err) => {
            debug!(%url, error = %err, "local model service unreachable");
            false
        }
    }
}
