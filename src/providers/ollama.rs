use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use log::error;

use crate::errors::ProviderError;
use super::{CompletionRequest, Provider, error_from_response, non_empty};

/// Ollama client for interacting with Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant, or tool)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat request for the Ollama API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model name to use for generation
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Chat response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Response message
    pub message: Option<ChatMessage>,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
}

impl ChatRequest {
    /// Create a new non-streaming chat request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: None,
            stream: false,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
        });
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from a base URL such as `http://localhost:11434`
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{}", base_url)
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                // Ollama speaks HTTP/1.1
                .http1_only()
                .build()
                .unwrap_or_default(),
        }
    }

    /// Chat with the Ollama API
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self.client.post(&url)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let response_text = response.text().await?;
        Self::parse_chat_response(&response_text)
    }

    /// Parse a chat response body
    ///
    /// Some servers stream JSONL even when asked not to; in that case the
    /// message pieces of every line are concatenated.
    pub fn parse_chat_response(body: &str) -> Result<ChatResponse, ProviderError> {
        if let Ok(parsed) = serde_json::from_str::<ChatResponse>(body) {
            return Ok(parsed);
        }

        let mut content = String::new();
        let mut done = false;
        let mut parsed_lines = 0;
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<ChatResponse>(line) {
                Ok(piece) => {
                    parsed_lines += 1;
                    done |= piece.done;
                    if let Some(message) = piece.message {
                        content.push_str(&message.content);
                    }
                }
                Err(e) => {
                    error!("Failed to parse Ollama chat line: {}", e);
                }
            }
        }

        if parsed_lines == 0 {
            return Err(ProviderError::ParseError("Ollama chat response contains invalid JSON".to_string()));
        }

        Ok(ChatResponse {
            message: Some(ChatMessage {
                role: "assistant".to_string(),
                content,
            }),
            done,
        })
    }
}

#[async_trait]
impl Provider for Ollama {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let messages = vec![
            ChatMessage { role: "system".to_string(), content: request.system },
            ChatMessage { role: "user".to_string(), content: request.content },
        ];
        let chat_request = ChatRequest::new(request.model, messages)
            .temperature(request.temperature);

        let response = self.chat(&chat_request).await?;
        non_empty(response.message.map(|m| m.content).unwrap_or_default())
    }

    async fn test_connection(&self, _model: &str) -> Result<(), ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
