//! Error types for roastme

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, RoastError>;

#[derive(Error, Debug)]
pub enum RoastError {
    #[error("Missing OPENAI_API_KEY environment variable")]
    MissingApiKey,

    #[error("{engine} request failed: {source}")]
    Http {
        engine: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{engine} API error: {status} {body}")]
    Status {
        engine: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{engine} returned an unexpected response: {reason}")]
    MalformedResponse { engine: &'static str, reason: String },

    #[error("the {0} engine does not talk to a model")]
    NotRemote(&'static str),

    #[error("no canned roasts available for {0} mode")]
    EmptyPool(crate::mode::Mode),

    #[error("meme renderer failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}
