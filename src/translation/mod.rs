/*!
 * Translation service for subtitle content.
 *
 * This module provides the pieces of the translation pipeline:
 * - Prompt text and chunk rendering
 * - Core translation service (one request per chunk)
 * - Positional alignment of model answers
 * - Sequential batch processing with retry and progress reporting
 */

pub mod alignment;
pub mod batch;
pub mod core;
pub mod prompts;

pub use self::alignment::{AlignmentReport, align_response, align_response_with_report};
pub use self::batch::{BatchTranslator, RetryPolicy, RunState, progress_percent};
pub use self::core::TranslationService;
pub use self::prompts::{SYSTEM_INSTRUCTION, render_chunk};
