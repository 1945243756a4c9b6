//! Structify LLM Provider Layer
//!
//! Pluggable chat-completion providers for structured data extraction.
//!
//! # Architecture
//!
//! This crate defines the [`CompletionProvider`] seam between the
//! extraction pipeline and concrete LLM backends. Providers receive a
//! [`CompletionRequest`] (messages plus an optional `response_format`
//! constraint) and return the raw completion text. Prompt assembly,
//! completion parsing, and validation all live upstream.
//!
//! # Providers
//!
//! - [`MockProvider`]: deterministic mock for testing
//! - [`OpenAiProvider`]: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use structify_llm::{ChatMessage, CompletionProvider, CompletionRequest, MockProvider};
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"title": "Pasta"}"#);
//! let request = CompletionRequest::new(vec![ChatMessage::user("extract this")]);
//! let completion = provider.complete(&request).await.unwrap();
//! assert_eq!(completion, r#"{"title": "Pasta"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the LLM API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded after retries
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Requested model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// API key rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The API rejected the request payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// End-user content
    User,
    /// Model output
    Assistant,
}

/// One message of a chat prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A completion request handed to a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Chat messages in prompt order
    pub messages: Vec<ChatMessage>,

    /// Optional structured-output constraint (a response format envelope)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,

    /// Sampling temperature; extraction wants determinism, so 0 by default
    pub temperature: f32,

    /// Nucleus sampling parameter, 0 by default
    pub top_p: f32,
}

impl CompletionRequest {
    /// Create a request with deterministic sampling defaults
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            response_format: None,
            temperature: 0.0,
            top_p: 0.0,
        }
    }

    /// Attach a response format constraint
    pub fn with_response_format(mut self, format: Value) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// Chat-completion backend seam
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the request and return the raw completion text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;

    /// Name of the model answering requests, for logging and metadata
    fn model_name(&self) -> &str;
}

/// Mock provider for deterministic testing
///
/// Returns a pre-configured response without any network calls, counts
/// invocations, and captures the last request so tests can assert on
/// the response format passed through.
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: String,
    fail_with: Option<String>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a provider that answers every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail_with: None,
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a provider that fails every request with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: String::new(),
            fail_with: Some(message.into()),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.fail_with {
            Some(message) => Err(LlmError::Other(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
