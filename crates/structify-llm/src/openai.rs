//! OpenAI-compatible chat completions provider
//!
//! Talks to any endpoint implementing the OpenAI chat completions API.
//! Transient failures (connection errors, timeouts, rate limits, 5xx)
//! are retried with exponential backoff; everything else maps to a
//! typed [`LlmError`] immediately. Retry policy lives here at the
//! provider boundary, never in the extraction core.

use crate::{ChatMessage, CompletionProvider, CompletionRequest, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI-compatible chat completions client
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    top_p: f32,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a Value>,
}

/// Response body from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider against the default endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model)
    }

    /// Create a provider against a custom endpoint
    ///
    /// Useful for proxies and OpenAI-compatible local servers.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("reqwest client with static configuration");

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: request.temperature,
            top_p: request.top_p,
            messages: &request.messages,
            response_format: request.response_format.as_ref(),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ChatCompletionResponse =
                            response.json().await.map_err(|e| {
                                LlmError::InvalidResponse(format!(
                                    "Failed to parse response: {e}"
                                ))
                            })?;
                        return extract_content(parsed);
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(LlmError::Unauthorized(format!("HTTP {status}")));
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::BAD_REQUEST
                        || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
                    {
                        let detail = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(LlmError::InvalidRequest(detail));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        warn!("Rate limited, retrying (attempt {})", attempts + 1);
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else if status.is_server_error() {
                        let detail = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        warn!("Server error {}, retrying (attempt {})", status, attempts + 1);
                        last_error =
                            Some(LlmError::Communication(format!("HTTP {status}: {detail}")));
                    } else {
                        return Err(LlmError::Communication(format!("HTTP {status}")));
                    }
                }
                Err(e) => {
                    warn!("Request failed, retrying (attempt {}): {}", attempts + 1, e);
                    last_error = Some(LlmError::Communication(format!("Request failed: {e}")));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

fn extract_content(response: ChatCompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no completion".to_string()))
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.send(request).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
