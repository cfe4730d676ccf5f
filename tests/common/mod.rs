/*!
 * Common test utilities for the zhsubs test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use zhsubs::app_config::Config;
use zhsubs::app_controller::Controller;
use zhsubs::providers::Provider;
use zhsubs::providers::mock::MockProvider;
use zhsubs::subtitle_processor::SubtitleEntry;
use zhsubs::translation::TranslationService;

/// Three-entry English SRT document
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Builds `count` numbered entries with distinct timestamps
pub fn numbered_entries(count: usize) -> Vec<SubtitleEntry> {
    (1..=count)
        .map(|i| {
            SubtitleEntry::new(
                i.to_string(),
                format!("00:{:02}:{:02},000 --> 00:{:02}:{:02},900", i / 60, i % 60, i / 60, i % 60),
                format!("Sentence number {}", i),
            )
        })
        .collect()
}

/// Translation service backed by a mock provider
pub fn mock_service(mock: &MockProvider) -> TranslationService {
    let provider: Arc<dyn Provider> = Arc::new(mock.clone());
    TranslationService::with_provider(provider, "mock-model")
}

/// Controller with default settings and a mock provider
pub fn mock_controller(mock: &MockProvider) -> Controller {
    Controller::with_service(Config::default(), mock_service(mock))
}

/// Route library logs to the test output when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
