/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use chapterlate::file_utils::{FileManager, RESULTS_DIR_NAME};
use chapterlate::translation::ItemRange;
use crate::common;

/// Test output path generation
#[test]
fn test_generate_output_path_withRange_shouldEmbedBounds() {
    let range = ItemRange::parse("2-4", 10);
    let path = FileManager::generate_output_path("vol1", "/tmp/results", &range);

    assert_eq!(path, std::path::PathBuf::from("/tmp/results/vol1_translated_2_4.json"));
}

/// Test output path generation for an empty source
#[test]
fn test_generate_output_path_withEmptyRange_shouldStillBeDeterministic() {
    let first = FileManager::generate_output_path("vol1", "out", &ItemRange::empty());
    let second = FileManager::generate_output_path("vol1", "out", &ItemRange::parse("7", 0));

    assert_eq!(first, second);
    assert_eq!(first.file_name().and_then(|n| n.to_str()), Some("vol1_translated_1_0.json"));
}

/// Test directory creation
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join(RESULTS_DIR_NAME);

    assert!(!FileManager::dir_exists(&nested));
    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // Second call is a no-op
    FileManager::ensure_dir(&nested)?;

    Ok(())
}

/// Test writing creates missing directories and leaves no temp files behind
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("results").join("out.json");

    FileManager::write_to_file(&path, "[]")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "[]");
    let entries = std::fs::read_dir(temp_dir.path().join("results"))?.count();
    assert_eq!(entries, 1);

    Ok(())
}

/// Test writing over an existing file replaces it
#[test]
fn test_write_to_file_withExistingFile_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "out.json", "old content that is longer")?;

    FileManager::write_to_file(&path, "new")?;

    assert_eq!(std::fs::read_to_string(&path)?, "new");

    Ok(())
}

/// Test reading a missing file reports the path
#[test]
fn test_read_to_string_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.json");

    let err = FileManager::read_to_string(&missing).unwrap_err();
    assert!(err.to_string().contains("missing.json"));

    Ok(())
}

/// Test the default results directory is named after the results folder
#[test]
fn test_default_results_dir_shouldEndWithResults() {
    let dir = FileManager::default_results_dir();
    assert!(dir.ends_with(RESULTS_DIR_NAME));
}
