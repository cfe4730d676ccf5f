/*!
 * Mock provider implementation for testing.
 *
 * The mock simulates the behaviors the batch translator has to cope with:
 * - `MockProvider::working()` - echoes every SRT block back with marked text
 * - `MockProvider::fail_first(n)` - fails `n` times, then works
 * - `MockProvider::failing()` - always fails with an error
 * - `MockProvider::fixed(text)` - always answers with the same text
 * - `MockProvider::empty()` - answers with no usable text
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, Provider};
use crate::subtitle_processor::split_blocks;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Echo each block, replacing its text with `[ZH] <text>`
    Working,
    /// Fail the first `failures` requests, then behave like `Working`
    FailFirst { failures: usize },
    /// Always fails with an error
    Failing,
    /// Always return this exact text
    Fixed(String),
    /// Returns no usable text
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Every request received, shared between clones
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Arrival time of every request, shared between clones
    request_times: Arc<Mutex<Vec<Instant>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            request_times: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a provider that fails `failures` times before succeeding
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that always returns `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// When each request arrived, in order
    ///
    /// Uses the tokio clock, so gaps are exact under a paused runtime.
    pub fn request_times(&self) -> Vec<Instant> {
        self.request_times.lock().expect("request log poisoned").clone()
    }

    /// Echo SRT blocks back with `[ZH]` prepended to their text
    pub fn echo_translation(content: &str) -> String {
        split_blocks(content)
            .iter()
            .map(|block| {
                let lines: Vec<&str> = block.lines().collect();
                if lines.len() < 3 {
                    return format!("[ZH] {}", block);
                }
                format!("{}\n{}\n[ZH] {}", lines[0], lines[1], lines[2..].join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.request_times.lock().expect("request log poisoned").push(Instant::now());
        self.requests.lock().expect("request log poisoned").push(request.clone());

        match &self.behavior {
            MockBehavior::Working => Ok(Self::echo_translation(&request.content)),

            MockBehavior::FailFirst { failures } => {
                if count < *failures {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated transient failure (request #{})", count + 1),
                    })
                } else {
                    Ok(Self::echo_translation(&request.content))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Fixed(text) => Ok(text.clone()),

            MockBehavior::Empty => Err(ProviderError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
