/*!
 * Integration tests for translating subtitle files end to end
 */

use anyhow::Result;

use zhsubs::app_controller::{Controller, FileOutcome};
use zhsubs::file_utils::FileManager;
use zhsubs::providers::mock::MockProvider;
use zhsubs::subtitle_processor::{SubtitleCollection, parse_srt};
use crate::common;

#[tokio::test]
async fn test_run_withSrtFile_shouldWriteTranslationNextToInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "episode.en.srt")?;
    let mock = MockProvider::working();

    let outcome = common::mock_controller(&mock).run(input.clone(), None, false).await?;

    let expected_path = temp_dir.path().join("episode.zh.srt");
    assert_eq!(outcome, FileOutcome::Translated(expected_path.clone()));

    let written = SubtitleCollection::from_file(&expected_path)?;
    let original = parse_srt(common::SAMPLE_SRT);
    assert_eq!(written.entries.len(), original.len());
    for (out, src) in written.entries.iter().zip(&original) {
        assert_eq!(out.id, src.id);
        assert_eq!(out.timestamp, src.timestamp);
        assert_eq!(out.text, format!("[ZH] {}", src.text));
    }
    Ok(())
}

#[tokio::test]
async fn test_run_withExplicitOutput_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let output = temp_dir.path().join("out/chinese.srt");

    let outcome = common::mock_controller(&MockProvider::working())
        .run(input, Some(output.clone()), false)
        .await?;

    assert_eq!(outcome, FileOutcome::Translated(output.clone()));
    assert!(FileManager::file_exists(&output));
    Ok(())
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let existing = common::create_test_file(temp_dir.path(), "movie.zh.srt", "keep me")?;
    let mock = MockProvider::working();
    let controller = common::mock_controller(&mock);

    let outcome = controller.run(input.clone(), None, false).await?;
    assert_eq!(outcome, FileOutcome::Skipped(existing.clone()));
    assert_eq!(FileManager::read_to_string(&existing)?, "keep me");
    assert_eq!(mock.request_count(), 0);

    controller.run(input, None, true).await?;
    assert!(FileManager::read_to_string(&existing)?.contains("[ZH] "));
    Ok(())
}

#[tokio::test]
async fn test_run_withNoValidEntries_shouldFailWithoutCallingProvider() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "broken.srt", "not a subtitle\nat all")?;
    let mock = MockProvider::working();

    let result = common::mock_controller(&mock).run(input, None, false).await;

    let error = result.unwrap_err();
    assert!(format!("{:#}", error).contains("No valid subtitle entries"));
    assert_eq!(mock.request_count(), 0);
    assert!(!FileManager::file_exists(temp_dir.path().join("broken.zh.srt")));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_run_withFailingProvider_shouldNotWriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let mock = MockProvider::failing();

    let error = common::mock_controller(&mock).run(input, None, false).await.unwrap_err();

    assert!(format!("{:#}", error).contains("chunk starting at entry 1"));
    assert!(!FileManager::file_exists(temp_dir.path().join("movie.zh.srt")));
    Ok(())
}

#[tokio::test]
async fn test_runFolder_shouldTranslateSourcesAndSkipTranslations() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_subtitle(temp_dir.path(), "season1/b.en.srt")?;
    common::create_test_subtitle(temp_dir.path(), "c.srt")?;
    common::create_test_file(temp_dir.path(), "c.zh.srt", "done already")?;
    let mock = MockProvider::working();

    let summary = common::mock_controller(&mock)
        .run_folder(temp_dir.path().to_path_buf(), false)
        .await?;

    assert_eq!(summary.translated, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.conflicts, 0);
    assert!(FileManager::file_exists(temp_dir.path().join("a.zh.srt")));
    assert!(FileManager::file_exists(temp_dir.path().join("season1/b.zh.srt")));
    assert_eq!(FileManager::read_to_string(temp_dir.path().join("c.zh.srt"))?, "done already");
    assert_eq!(mock.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_runFolder_withNoSubtitles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.txt", "nothing here")?;

    let controller: Controller = common::mock_controller(&MockProvider::working());
    assert!(controller.run_folder(temp_dir.path().to_path_buf(), false).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_runFolder_withTwoInputsForOneOutput_shouldTranslateOnlyTheFirst() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "movie.en.srt")?;
    common::create_test_file(temp_dir.path(), "movie.srt", "1\n00:00:01,000 --> 00:00:02,000\nOther cut\n")?;
    let mock = MockProvider::working();

    let summary = common::mock_controller(&mock)
        .run_folder(temp_dir.path().to_path_buf(), true)
        .await?;

    assert_eq!(summary.translated, 1);
    assert_eq!(summary.conflicts, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(mock.request_count(), 1);
    let written = FileManager::read_to_string(temp_dir.path().join("movie.zh.srt"))?;
    assert!(written.contains("[ZH] This is a test subtitle."));
    assert!(!written.contains("Other cut"));
    Ok(())
}

#[tokio::test]
async fn test_checkConnection_withFailingProvider_shouldRejectBeforeAnyFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let mock = MockProvider::failing();
    let controller = common::mock_controller(&mock);

    let error = controller.check_connection().await.unwrap_err();

    let message = format!("{:#}", error);
    assert!(message.contains("Connection check failed"));
    assert!(message.contains("Failed to connect to Mock"));
    assert_eq!(mock.request_count(), 1);
    assert!(FileManager::file_exists(&input));
    assert!(!FileManager::file_exists(temp_dir.path().join("movie.zh.srt")));
    Ok(())
}

#[tokio::test]
async fn test_checkConnection_withWorkingProvider_shouldSendOneRequest() -> Result<()> {
    let mock = MockProvider::working();

    common::mock_controller(&mock).check_connection().await?;

    assert_eq!(mock.request_count(), 1);
    assert_eq!(mock.requests()[0].model, "mock-model");
    Ok(())
}
