/*!
 * # zhsubs - English to Chinese subtitle translation
 *
 * A Rust library for translating SRT subtitles to Simplified Chinese with an LLM.
 *
 * ## Features
 *
 * - Lenient SRT parsing and canonical serialization
 * - Chunked translation through various AI providers:
 *   - Gemini API
 *   - OpenAI API
 *   - Anthropic API
 *   - Ollama (local LLM)
 * - Subtitle numbers and timestamps always kept from the source
 * - Sequential chunks with exponential-backoff retry and progress reporting
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing, serialization and chunking
 * - `translation`: AI-powered translation services:
 *   - `translation::prompts`: System instruction and chunk rendering
 *   - `translation::core`: One request per chunk
 *   - `translation::alignment`: Mapping answers back onto entries
 *   - `translation::batch`: Sequential processing with retry
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for various LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod subtitle_processor;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry, parse_srt, serialize_srt, split_into_chunks};
pub use translation::{BatchTranslator, RetryPolicy, RunState, TranslationService, align_response};
pub use errors::{ProviderError, SubtitleError, TranslationError};
