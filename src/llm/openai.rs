//! OpenAI-compatible chat-completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::llm::ChatModel;
use crate::{Error, Result};

/// Generous ceiling; summarizing a large chunk takes a while
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Chat model backed by an OpenAI-compatible `/v1/chat/completions` endpoint
pub struct OpenAiModel {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiModel {
    /// Create a client for one model tier
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("request to {} failed: {e}", self.model)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if is_oversize_rejection(status, &body) {
                return Err(Error::PromptTooLarge(format!("{status}: {body}")));
            }
            return Err(Error::Llm(format!("API error: {status} - {body}")));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("failed to parse completion response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Llm(format!("{} returned an empty completion", self.model)))
    }
}

/// Whether an error response means "the prompt exceeds the context window",
/// as opposed to a transport or quota failure.
///
/// Context overflows come back as 400/413 with an overflow marker in the
/// body; some gateways report them as 429 with "too large".
fn is_oversize_rejection(status: StatusCode, body: &str) -> bool {
    let body = body.to_lowercase();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => {
            body.contains("context_length_exceeded")
                || body.contains("maximum context length")
                || body.contains("too large")
        }
        StatusCode::TOO_MANY_REQUESTS => body.contains("too large"),
        _ => false,
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    messages: Vec<RequestMessage>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_overflow_status_bodies_are_oversize() {
        assert!(is_oversize_rejection(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"code": "context_length_exceeded"}}"#,
        ));
        assert!(is_oversize_rejection(
            StatusCode::BAD_REQUEST,
            "This model's maximum context length is 128000 tokens",
        ));
        assert!(is_oversize_rejection(
            StatusCode::PAYLOAD_TOO_LARGE,
            "request body too large",
        ));
        assert!(is_oversize_rejection(
            StatusCode::TOO_MANY_REQUESTS,
            "Request too large for gpt-4.1-nano",
        ));
    }

    #[test]
    fn plain_failures_are_not_oversize() {
        assert!(!is_oversize_rejection(
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit reached, retry after 20s",
        ));
        assert!(!is_oversize_rejection(
            StatusCode::UNAUTHORIZED,
            "Incorrect API key provided",
        ));
        assert!(!is_oversize_rejection(
            StatusCode::BAD_REQUEST,
            "Invalid value for temperature",
        ));
        assert!(!is_oversize_rejection(StatusCode::INTERNAL_SERVER_ERROR, ""));
    }

    #[test]
    fn request_body_has_the_expected_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-4.1-nano".to_string(),
            temperature: 0.3,
            messages: vec![RequestMessage {
                role: "user",
                content: "summarize this".to_string(),
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4.1-nano");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "summarize this");
    }
}
