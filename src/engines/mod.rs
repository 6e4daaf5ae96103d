//! Roast generation backends and the adapter that picks between them.
//!
//! The canned backend never fails. The two chat backends can fail in many
//! ways (no key, nothing listening, bad status, garbage body); whenever they
//! do, [`RoastAdapter::roast`] logs the failure and answers from the canned
//! pool instead.

pub mod canned;
pub mod ollama;
pub mod openai;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, RoastError};
use crate::mode::Mode;
use crate::prompts;
use crate::report::AnalysisResult;

pub use ollama::OllamaConfig;
pub use openai::OpenAiConfig;

/// Names of the available backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Static,
    Ollama,
    #[serde(rename = "openai")]
    OpenAi,
}

impl EngineKind {
    pub fn all() -> &'static [EngineKind] {
        &[EngineKind::Static, EngineKind::Ollama, EngineKind::OpenAi]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Static => "static",
            EngineKind::Ollama => "ollama",
            EngineKind::OpenAi => "openai",
        }
    }

    pub fn from_name(name: &str) -> Option<EngineKind> {
        let name = name.trim().to_ascii_lowercase();
        EngineKind::all().iter().copied().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EngineKind::from_name(s)
            .ok_or_else(|| format!("unknown engine: {s} (expected static, ollama, or openai)"))
    }
}

/// Knobs shared by the chat backends. Unset fields use each backend's default.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub openai_endpoint: Option<String>,
    pub ollama_url: Option<String>,
}

/// A fully configured backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Engine {
    Static,
    OpenAi(OpenAiConfig),
    Ollama(OllamaConfig),
}

impl Engine {
    pub fn new(kind: EngineKind, options: &EngineOptions) -> Self {
        match kind {
            EngineKind::Static => Engine::Static,
            EngineKind::OpenAi => Engine::OpenAi(OpenAiConfig::new(
                options.model.clone(),
                options.api_key.clone(),
                options.openai_endpoint.clone(),
            )),
            EngineKind::Ollama => Engine::Ollama(OllamaConfig::new(
                options.model.clone(),
                options.ollama_url.clone(),
            )),
        }
    }

    /// Like [`Engine::new`] but from a name. Unknown names get the canned
    /// backend, with a warning.
    pub fn resolve(name: &str, options: &EngineOptions) -> Self {
        match EngineKind::from_name(name) {
            Some(kind) => Engine::new(kind, options),
            None => {
                warn!(engine = name, "unknown engine, using static roasts");
                Engine::Static
            }
        }
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Engine::Static => EngineKind::Static,
            Engine::OpenAi(_) => EngineKind::OpenAi,
            Engine::Ollama(_) => EngineKind::Ollama,
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, Engine::Static)
    }
}

/// Whether a backend can be used right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineAvailability {
    pub available: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: EngineKind,
    #[serde(flatten)]
    pub availability: EngineAvailability,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ResponseMessage {
    pub(crate) content: String,
}

/// Only Ollama gets the RoastBot system message; OpenAI receives the bare
/// roast prompt.
fn roast_system_message(engine: &Engine, mode: Mode) -> Option<String> {
    match engine {
        Engine::Ollama(_) => Some(prompts::system_message(mode)),
        Engine::Static | Engine::OpenAi(_) => None,
    }
}

pub(crate) fn chat_messages<'a>(system: Option<&'a str>, prompt: &'a str) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });
    messages
}

/// Dispatches roast requests to a backend and owns the HTTP client they share.
#[derive(Debug, Clone, Default)]
pub struct RoastAdapter {
    client: reqwest::Client,
}

impl RoastAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Generate a roast. A failing chat backend is replaced by one canned
    /// roast; only a failing canned backend surfaces an error.
    pub async fn roast(
        &self,
        engine: &Engine,
        analysis: &AnalysisResult,
        mode: Mode,
        context: &str,
    ) -> Result<String> {
        match self.roast_with(engine, analysis, mode, context).await {
            Ok(roast) => Ok(roast),
            Err(err) if engine.is_remote() => {
                warn!(engine = %engine.kind(), error = %err, "engine failed, falling back to static");
                canned::roast(mode)
            }
            Err(err) => Err(err),
        }
    }

    async fn roast_with(
        &self,
        engine: &Engine,
        analysis: &AnalysisResult,
        mode: Mode,
        context: &str,
    ) -> Result<String> {
        match engine {
            Engine::Static => canned::roast(mode),
            Engine::OpenAi(_) | Engine::Ollama(_) => {
                let prompt = prompts::roast(context, mode, analysis);
                let system = roast_system_message(engine, mode);
                self.complete(engine, system.as_deref(), &prompt, mode).await
            }
        }
    }

    /// Send one raw prompt to a chat backend. No fallback.
    pub async fn complete(
        &self,
        engine: &Engine,
        system: Option<&str>,
        prompt: &str,
        mode: Mode,
    ) -> Result<String> {
        match engine {
            Engine::Static => Err(RoastError::NotRemote("static")),
            Engine::OpenAi(config) => openai::chat(&self.client, config, system, prompt, mode).await,
            Engine::Ollama(config) => ollama::chat(&self.client, config, system, prompt, mode).await,
        }
    }

    /// Probe a backend. Never fails: every problem becomes `available: false`.
    pub async fn check_availability(&self, engine: &Engine) -> EngineAvailability {
        match engine {
            Engine::Static => EngineAvailability {
                available: true,
                description: "Pre-written roasts with zero setup required".into(),
                setup: None,
            },
            Engine::OpenAi(config) => {
                let available = config.has_credentials();
                EngineAvailability {
                    available,
                    description: "Cloud AI-powered roasts using OpenAI API".into(),
                    setup: (!available)
                        .then(|| format!("Set {} environment variable", openai::API_KEY_ENV)),
                }
            }
            Engine::Ollama(config) => {
                let available = ollama::probe(&self.client, config).await;
                EngineAvailability {
                    available,
                    description: "Local AI-powered roasts using Ollama".into(),
                    setup: (!available).then(|| ollama::INSTALL_HINT.to_string()),
                }
            }
        }
    }

    /// Probe every backend in turn.
    pub async fn list_engines(&self, options: &EngineOptions) -> Vec<EngineInfo> {
        let mut engines = Vec::with_capacity(EngineKind::all().len());
        for kind in EngineKind::all() {
            let engine = Engine::new(*kind, options);
            engines.push(EngineInfo {
                name: *kind,
                availability: self.check_availability(&engine).await,
            });
        }
        engines
    }
}
