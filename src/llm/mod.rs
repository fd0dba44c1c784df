//! Language-model access
//!
//! The pipelines only ever need one operation: prompt in, summary out.
//! [`ChatModel`] keeps that seam narrow so tests can script the model and
//! the binary can pick cheap or strong tiers per stage.

pub mod openai;

pub use openai::OpenAiModel;

use async_trait::async_trait;

use crate::Result;

/// A summarization-capable chat model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logging
    fn name(&self) -> &str;

    /// Produce a completion for one prompt.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PromptTooLarge`] when the model refuses the
    /// prompt as exceeding its context window, and [`crate::Error::Llm`]
    /// for any other failure.
    async fn summarize(&self, prompt: &str) -> Result<String>;
}
