/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which sends one chunk
 * of subtitle entries to the configured provider and returns the raw answer.
 * It never retries; that is the batch translator's job.
 */

use anyhow::{Result, anyhow};
use log::debug;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;
use crate::providers::anthropic::Anthropic;
use crate::providers::gemini::Gemini;
use crate::providers::ollama::Ollama;
use crate::providers::openai::OpenAI;
use crate::providers::{CompletionRequest, Provider};
use crate::subtitle_processor::SubtitleEntry;

use super::prompts::{SYSTEM_INSTRUCTION, render_chunk};

/// Check that an endpoint is an absolute http(s) URL
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    if url.host_str().is_none() {
        return Err(anyhow!("Invalid host in endpoint: {}", endpoint));
    }

    Ok(url)
}

/// Main translation service for subtitle chunks
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Provider client
    provider: Arc<dyn Provider>,

    /// Model identifier sent with every request
    model: String,

    /// System instruction sent with every request
    system_prompt: String,

    /// Sampling temperature
    temperature: f32,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let endpoint = parse_endpoint(&config.get_endpoint())?;
        let endpoint = endpoint.as_str().trim_end_matches('/').to_string();
        let timeout_secs = config.get_timeout_secs();

        let provider: Arc<dyn Provider> = match config.provider {
            TranslationProvider::Gemini => {
                Arc::new(Gemini::new(config.get_api_key(), endpoint, timeout_secs))
            }
            TranslationProvider::OpenAI => {
                Arc::new(OpenAI::new(config.get_api_key(), endpoint, timeout_secs))
            }
            TranslationProvider::Anthropic => {
                Arc::new(Anthropic::new(config.get_api_key(), endpoint, timeout_secs))
            }
            TranslationProvider::Ollama => Arc::new(Ollama::new(endpoint, timeout_secs)),
        };

        let system_prompt = config
            .common
            .system_prompt
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_string());

        Ok(Self {
            provider,
            model: config.get_model(),
            system_prompt,
            temperature: config.common.temperature,
        })
    }

    /// Create a service around an existing provider with the default prompt
    pub fn with_provider(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            system_prompt: SYSTEM_INSTRUCTION.to_string(),
            temperature: 0.2,
        }
    }

    /// Replace the system instruction
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model identifier in use
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request for one chunk
    pub fn build_request(&self, chunk: &[SubtitleEntry]) -> CompletionRequest {
        CompletionRequest::new(
            self.model.clone(),
            self.system_prompt.clone(),
            render_chunk(chunk),
            self.temperature,
        )
    }

    /// Translate one chunk and return the provider's raw text
    ///
    /// A single attempt is made; errors are returned unchanged.
    pub async fn translate_chunk(&self, chunk: &[SubtitleEntry]) -> Result<String, ProviderError> {
        let request = self.build_request(chunk);
        let start_time = Instant::now();
        let result = self.provider.complete(request).await;

        debug!(
            "{} answered chunk of {} entries in {:?} ({})",
            self.provider.name(),
            chunk.len(),
            start_time.elapsed(),
            if result.is_ok() { "ok" } else { "error" }
        );

        result
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<()> {
        self.provider
            .test_connection(&self.model)
            .await
            .map_err(|e| anyhow!("Failed to connect to {}: {}", self.provider.name(), e))
    }
}
