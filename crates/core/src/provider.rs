//! Outbound text-generation provider.
//!
//! The service talks to the provider only through [`CompletionProvider`]. [`OpenAiProvider`] is
//! the production implementation; tests substitute stubs.

use crate::config::{ApiKey, CoreConfig};
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// One non-streaming completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A text-generation backend exposing a single "create completion" operation.
///
/// Implementations return the generated text, which may be empty; the caller decides what an
/// empty result means. Retry and rate-limit behaviour, if any, belong to the implementation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError>;
}

/// Provider backed by the OpenAI Chat Completions REST API.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
}

impl OpenAiProvider {
    /// Creates a provider for `base_url` (for example `https://api.openai.com/v1`).
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    /// Builds the HTTP client (with the configured transport timeout) and the provider.
    pub fn from_config(cfg: &CoreConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(|err| ProviderError::Transport(format!("failed to build HTTP client: {err}")))?;
        Ok(Self::new(client, cfg.openai_base_url()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(endpoint = %self.endpoint, model = %request.model, "sending completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(format!("failed to parse OpenAI response: {err}")))?;

        Ok(extract_text_response(parsed))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
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

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: String) -> ProviderError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    ProviderError::Status {
        status: status.as_u16(),
        message,
    }
}
