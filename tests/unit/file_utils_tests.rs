/*!
 * Tests for file and folder utilities
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use zhsubs::file_utils::FileManager;
use crate::common;

#[test]
fn test_generateOutputPath_withPlainName_shouldAppendLanguage() {
    let path = FileManager::generate_output_path("movie.srt", "/out", "zh");
    assert_eq!(path, PathBuf::from("/out/movie.zh.srt"));
}

#[test]
fn test_generateOutputPath_withLanguageTag_shouldReplaceIt() {
    assert_eq!(
        FileManager::generate_output_path("/in/movie.en.srt", "/in", "zh"),
        PathBuf::from("/in/movie.zh.srt")
    );
    assert_eq!(
        FileManager::generate_output_path("movie.eng.srt", "", "zh"),
        PathBuf::from("movie.zh.srt")
    );
}

#[test]
fn test_generateOutputPath_withDottedTitle_shouldKeepTitle() {
    assert_eq!(
        FileManager::generate_output_path("the.end.srt", "", "zh"),
        PathBuf::from("the.end.zh.srt")
    );
}

#[test]
fn test_findFiles_shouldRecurseAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    common::create_test_subtitle(temp_dir.path(), "a.SRT")?;
    common::create_test_subtitle(temp_dir.path(), "season1/c.srt")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "x")?;

    let found = FileManager::find_files(temp_dir.path(), "srt")?;
    let names: Vec<String> = found
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap_or(p).to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.SRT", "b.srt", "season1/c.srt"]);
    Ok(())
}

#[test]
fn test_writeToFile_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("nested/dir/out.srt");

    FileManager::write_to_file(&target, "content")?;

    assert!(FileManager::file_exists(&target));
    assert!(FileManager::dir_exists(temp_dir.path().join("nested/dir")));
    assert_eq!(FileManager::read_to_string(&target)?, "content");
    Ok(())
}

#[test]
fn test_readToString_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string(Path::new("/definitely/not/here.srt")).is_err());
}
