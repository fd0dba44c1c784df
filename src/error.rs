//! Error types for the chronicler

use thiserror::Error;

/// Result type alias for chronicler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while chronicling a chat archive
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat export could not be read or parsed
    #[error("export error: {0}")]
    Export(String),

    /// Message link could not be parsed
    #[error("invalid message link: {0}")]
    InvalidLink(String),

    /// Summary cache error
    #[error("cache error: {0}")]
    Cache(String),

    /// Language-model call failed (transport, quota, malformed response)
    #[error("llm error: {0}")]
    Llm(String),

    /// The model refused the prompt as too large for its context window.
    /// Recoverable by bisecting the chunk; fatal for a single message.
    #[error("prompt too large: {0}")]
    PromptTooLarge(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error is the oversize condition that chunk bisection
    /// can recover from.
    #[must_use]
    pub const fn is_oversize(&self) -> bool {
        matches!(self, Self::PromptTooLarge(_))
    }
}
