/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use zhsubs::errors::{ProviderError, SubtitleError, TranslationError};

#[test]
fn test_providerError_fromStatus_shouldPickVariant() {
    assert!(matches!(ProviderError::from_status(401, "no"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "no"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow"), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(503, "busy"),
        ProviderError::ApiError { status_code: 503, .. }
    ));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 500,
        message: "Internal".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("500"));
    assert!(display.contains("Internal"));
}

#[test]
fn test_chunkFailed_shouldNameStartIndexAndKeepSource() {
    let error = TranslationError::ChunkFailed {
        start_index: 21,
        attempts: 4,
        source: ProviderError::ConnectionError("reset by peer".to_string()),
    };

    let display = error.to_string();
    assert!(display.contains("entry 21"));
    assert!(display.contains("4 attempts"));
    assert!(display.contains("reset by peer"));
    assert_eq!(error.failed_chunk_start(), 21);
    assert!(error.source().is_some());
}

#[test]
fn test_subtitleError_noEntries_shouldDescribeEmptyDocument() {
    let error = SubtitleError::NoEntries;
    assert!(error.to_string().contains("No valid subtitle entries"));
    assert!(error.source().is_none());
}
