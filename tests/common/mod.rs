/*!
 * Common test utilities for the chapterlate test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;


/// Route library logs through the test harness; honours RUST_LOG
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// JSON array of `count` chapters titled "Chapter N"
pub fn sample_source_json(count: usize) -> String {
    let items: Vec<_> = (1..=count)
        .map(|i| json!({
            "title": format!("Chapter {}", i),
            "content": format!("第{}章の本文。", i),
        }))
        .collect();
    serde_json::to_string_pretty(&items).unwrap_or_default()
}

/// Writes a sample source array to `dir/filename`
pub fn create_sample_source(dir: &Path, filename: &str, count: usize) -> Result<PathBuf> {
    create_test_file(dir, filename, &sample_source_json(count))
}

/// A generateContent response body answering with `text`
pub fn gemini_response_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
    }).to_string()
}
