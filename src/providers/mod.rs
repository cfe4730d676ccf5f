/*!
 * Provider implementations for different text-generation services.
 *
 * This module contains client implementations for various LLM providers:
 * - Gemini: Google Generative Language API
 * - OpenAI: OpenAI chat completions (and compatible servers)
 * - Anthropic: Anthropic messages API
 * - Ollama: Local LLM server
 * - Mock: scripted provider used by tests
 *
 * None of them retries on its own; retry policy lives in the batch translator.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single text-in/text-out request to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// System instruction
    pub system: String,
    /// User content
    pub content: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        content: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            content: content.into(),
            temperature,
        }
    }
}

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request and return the raw generated text
    ///
    /// Implementations return `ProviderError::EmptyResponse` when the service
    /// answered without any usable text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        self.complete(CompletionRequest::new(model, "Reply with OK.", "Hello", 0.0))
            .await
            .map(|_| ())
    }

    /// Human readable provider name
    fn name(&self) -> &str;
}

/// Reject blank generations so callers can treat them as failures
pub(crate) fn non_empty(text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Read a failed response body into a provider error
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("Provider API error ({}): {}", status, error_text);
    ProviderError::from_status(status.as_u16(), error_text)
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;
