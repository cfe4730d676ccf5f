/*!
 * Batch translation processing.
 *
 * This module drives a whole subtitle list through the translation service:
 * entries are split into fixed-size chunks, chunks are translated strictly
 * one after another, and a failed chunk is retried with exponential backoff
 * before the run is abandoned.
 */

use log::{debug, info, warn};
use std::time::Duration;

use crate::app_config::{TranslationCommonConfig, TranslationConfig};
use crate::errors::{ProviderError, TranslationError};
use crate::subtitle_processor::{SubtitleEntry, split_into_chunks};

use super::alignment::align_response_with_report;
use super::core::TranslationService;

/// Retry settings for a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first one
    pub max_retries: u32,
    /// Backoff base in milliseconds
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Build the policy from the common translation settings
    pub fn from_common(common: &TranslationCommonConfig) -> Self {
        Self {
            max_retries: common.max_retries,
            backoff_base_ms: common.backoff_base_ms,
        }
    }

    /// Delay before retry number `attempt` (1-based): `base * 2^attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// Total number of attempts a chunk may get
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Lifecycle of one translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

/// Percentage of entries done, rounded to the nearest integer
///
/// An empty run counts as complete.
pub fn progress_percent(cumulative: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (cumulative.min(total) as f64 / total as f64 * 100.0).round();
    percent as u8
}

/// Batch translator for processing subtitle entries chunk by chunk
#[derive(Debug)]
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Entries per request
    chunk_size: usize,

    /// Retry behavior for failed chunks
    policy: RetryPolicy,

    /// Whether a block-count mismatch fails the attempt
    strict_alignment: bool,

    /// Current run state
    state: RunState,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService, chunk_size: usize, policy: RetryPolicy) -> Self {
        Self {
            service,
            chunk_size: chunk_size.max(1),
            policy,
            strict_alignment: false,
            state: RunState::Idle,
        }
    }

    /// Create a batch translator and its service from configuration
    pub fn from_config(config: &TranslationConfig) -> anyhow::Result<Self> {
        let service = TranslationService::new(config)?;
        Ok(Self::new(service, config.common.chunk_size, RetryPolicy::from_common(&config.common))
            .strict_alignment(config.common.strict_alignment))
    }

    /// Enable or disable strict alignment
    pub fn strict_alignment(mut self, strict: bool) -> Self {
        self.strict_alignment = strict;
        self
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Entries per request
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Underlying translation service
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate every entry, reporting cumulative progress after each chunk
    ///
    /// Chunks run sequentially in input order. `on_progress` receives the
    /// number of entries translated so far and the total. The first chunk
    /// that exhausts its retries aborts the run with
    /// `TranslationError::ChunkFailed`; nothing partial is returned.
    pub async fn translate_entries(
        &mut self,
        entries: &[SubtitleEntry],
        mut on_progress: impl FnMut(usize, usize),
    ) -> Result<Vec<SubtitleEntry>, TranslationError> {
        self.state = RunState::Running;
        let total = entries.len();

        if total == 0 {
            self.state = RunState::Completed;
            return Ok(Vec::new());
        }

        let chunks = split_into_chunks(entries, self.chunk_size);
        let total_chunks = chunks.len();
        let mut translated = Vec::with_capacity(total);

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let start_index = chunk_index * self.chunk_size + 1;
            debug!("Processing chunk {} of {} (entries {}..={})",
                chunk_index + 1, total_chunks, start_index, start_index + chunk.len() - 1);

            match self.translate_chunk_with_retry(chunk, start_index).await {
                Ok(aligned) => translated.extend(aligned),
                Err(e) => {
                    self.state = RunState::Failed;
                    return Err(e);
                }
            }

            on_progress(translated.len(), total);
            info!("Translated {}/{} entries ({}%)",
                translated.len(), total, progress_percent(translated.len(), total));
        }

        self.state = RunState::Completed;
        Ok(translated)
    }

    async fn translate_chunk_with_retry(
        &self,
        chunk: &[SubtitleEntry],
        start_index: usize,
    ) -> Result<Vec<SubtitleEntry>, TranslationError> {
        let mut attempt: u32 = 0;

        loop {
            let error = match self.attempt_chunk(chunk, start_index).await {
                Ok(aligned) => return Ok(aligned),
                Err(e) => e,
            };

            if attempt >= self.policy.max_retries {
                return Err(TranslationError::ChunkFailed {
                    start_index,
                    attempts: attempt + 1,
                    source: error,
                });
            }

            attempt += 1;
            let delay = self.policy.delay_for(attempt);
            warn!("Chunk starting at entry {} failed ({}), retry {}/{} in {:?}",
                start_index, error, attempt, self.policy.max_retries, delay);
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt_chunk(
        &self,
        chunk: &[SubtitleEntry],
        start_index: usize,
    ) -> Result<Vec<SubtitleEntry>, ProviderError> {
        let raw = self.service.translate_chunk(chunk).await?;
        let (aligned, report) = align_response_with_report(&raw, chunk);

        if !report.is_exact() {
            if self.strict_alignment {
                return Err(ProviderError::ParseError(format!(
                    "expected {} subtitle blocks, got {}",
                    report.expected, report.received
                )));
            }
            if report.is_shortfall() {
                warn!("Chunk starting at entry {}: response had {} of {} blocks, kept original text for {} entries",
                    start_index, report.received, report.expected, report.fallbacks);
            } else {
                debug!("Chunk starting at entry {}: ignored {} surplus blocks",
                    start_index, report.received - report.expected);
            }
        } else if report.fallbacks > 0 {
            warn!("Chunk starting at entry {}: {} empty blocks kept original text",
                start_index, report.fallbacks);
        }

        Ok(aligned)
    }
}
