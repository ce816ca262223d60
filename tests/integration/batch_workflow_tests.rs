/*!
 * End-to-end batch processing tests with in-process translators
 */

use anyhow::Result;
use chapterlate::providers::mock::MockProvider;
use chapterlate::translation::{BatchRunner, ResultRecord, TranslationClient, FALLBACK_MODEL};
use crate::common;
use crate::common::http_server::MockHttpServer;
use crate::common::stub_translators::ScriptedTranslator;

fn read_records(path: &std::path::Path) -> Result<Vec<ResultRecord>> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

/// Test a sub-range of a remote source is translated in order
#[tokio::test]
async fn test_run_withRemoteSource_shouldTranslateSelectedRangeInOrder() -> Result<()> {
    let server = MockHttpServer::start(200, common::sample_source_json(5)).await?;
    let output_dir = common::create_temp_dir()?;
    let translator = ScriptedTranslator::default();
    let runner = BatchRunner::new(translator.clone(), output_dir.path());

    let summary = runner.run(&server.url("/novels/vol1.json"), "2-4").await?;

    assert_eq!((summary.range.start, summary.range.end), (2, 4));
    assert_eq!(summary.source_len, 5);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.translated, 3);
    assert_eq!(summary.fallback, 0);
    assert_eq!(summary.output_path, output_dir.path().join("vol1_translated_2_4.json"));

    let records = read_records(&summary.output_path)?;
    let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Chapter 2", "Chapter 3", "Chapter 4"]);
    assert!(records.iter().all(|r| r.translated && r.model == "scripted-model"));

    assert_eq!(translator.calls(), vec!["第2章の本文。", "第3章の本文。", "第4章の本文。"]);

    Ok(())
}

/// Test a failed item keeps its original content byte for byte
#[tokio::test]
async fn test_run_withFailingItem_shouldPassContentThrough() -> Result<()> {
    let source_dir = common::create_temp_dir()?;
    let source = common::create_sample_source(source_dir.path(), "vol1.json", 3)?;
    let output_dir = common::create_temp_dir()?;
    let runner = BatchRunner::new(ScriptedTranslator::failing_on(&["第2章の本文。"]), output_dir.path());

    let summary = runner.run(&source.to_string_lossy(), "1-3").await?;

    assert_eq!(summary.translated, 2);
    assert_eq!(summary.fallback, 1);
    assert_eq!(summary.translated + summary.fallback, summary.total);

    let records = read_records(&summary.output_path)?;
    assert_eq!(records.len(), 3);
    assert!(!records[1].translated);
    assert_eq!(records[1].content, "第2章の本文。");
    assert_eq!(records[1].model, FALLBACK_MODEL);
    assert_eq!(records[0].content, "第1章の本文。".to_uppercase());

    Ok(())
}

/// Test a non-array payload aborts the run without writing output
#[tokio::test]
async fn test_run_withObjectSource_shouldFailWithoutOutput() -> Result<()> {
    let server = MockHttpServer::start(200, "{\"title\": \"Chapter 1\"}").await?;
    let base_dir = common::create_temp_dir()?;
    let output_dir = base_dir.path().join("results");
    let translator = ScriptedTranslator::default();
    let runner = BatchRunner::new(translator.clone(), &output_dir);

    let err = runner.run(&server.url("/vol1.json"), "1-2").await.unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Error fetching JSON from"));
    assert!(message.contains("expected an array"));
    assert!(!output_dir.exists());
    assert!(translator.calls().is_empty());

    Ok(())
}

/// Test a failing fetch aborts the run
#[tokio::test]
async fn test_run_withNotFoundSource_shouldFail() -> Result<()> {
    let server = MockHttpServer::start(404, "not here").await?;
    let output_dir = common::create_temp_dir()?;
    let runner = BatchRunner::new(ScriptedTranslator::default(), output_dir.path());

    assert!(runner.run(&server.url("/vol1.json"), "1").await.is_err());
    assert_eq!(std::fs::read_dir(output_dir.path())?.count(), 0);

    Ok(())
}

/// Test repeated runs write to the same file
#[tokio::test]
async fn test_run_twice_shouldOverwriteSameFile() -> Result<()> {
    let source_dir = common::create_temp_dir()?;
    let source = common::create_sample_source(source_dir.path(), "vol1.json", 4)?;
    let output_dir = common::create_temp_dir()?;

    let first = BatchRunner::new(ScriptedTranslator::default(), output_dir.path())
        .run(&source.to_string_lossy(), "1-2").await?;
    let second = BatchRunner::new(ScriptedTranslator::failing_on(&["第1章の本文。"]), output_dir.path())
        .run(&source.to_string_lossy(), "1-2").await?;

    assert_eq!(first.output_path, second.output_path);
    assert_eq!(std::fs::read_dir(output_dir.path())?.count(), 1);

    let records = read_records(&second.output_path)?;
    assert!(!records[0].translated);

    Ok(())
}

/// Test an empty source array produces an empty output array
#[tokio::test]
async fn test_run_withEmptySource_shouldWriteEmptyArray() -> Result<()> {
    let server = MockHttpServer::start(200, "[]").await?;
    let output_dir = common::create_temp_dir()?;
    let translator = ScriptedTranslator::default();
    let runner = BatchRunner::new(translator.clone(), output_dir.path());

    let summary = runner.run(&server.url("/empty.json"), "1-10").await?;

    assert_eq!(summary.total, 0);
    assert!(read_records(&summary.output_path)?.is_empty());
    assert!(translator.calls().is_empty());

    Ok(())
}

/// Test unparsable ranges select the whole source
#[tokio::test]
async fn test_run_withGarbageRange_shouldTranslateEverything() -> Result<()> {
    let source_dir = common::create_temp_dir()?;
    let source = common::create_sample_source(source_dir.path(), "vol1.json", 3)?;
    let output_dir = common::create_temp_dir()?;
    let runner = BatchRunner::new(ScriptedTranslator::default(), output_dir.path());

    let summary = runner.run(&source.to_string_lossy(), "everything").await?;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.output_path, output_dir.path().join("vol1_translated_1_3.json"));

    Ok(())
}

/// Test the provider-backed client through the runner, one call per item
#[tokio::test]
async fn test_run_withMockProvider_shouldCallProviderOncePerItem() -> Result<()> {
    let source_dir = common::create_temp_dir()?;
    let source = common::create_sample_source(source_dir.path(), "vol1.json", 6)?;
    let output_dir = common::create_temp_dir()?;
    let provider = MockProvider::intermittent(3).with_model("mock-flash");
    let runner = BatchRunner::new(TranslationClient::new(provider.clone(), "sys"), output_dir.path());

    let summary = runner.run(&source.to_string_lossy(), "6-1").await?;

    assert_eq!(summary.total, 6);
    assert_eq!(provider.request_count(), 6);
    assert_eq!(summary.fallback, 2);

    let records = read_records(&summary.output_path)?;
    assert_eq!(records[0].model, "mock-flash");
    assert_eq!(records[0].content, "[TRANSLATED] 第1章の本文。");
    assert_eq!(records[2].model, FALLBACK_MODEL);
    assert_eq!(records[2].content, "第3章の本文。");

    Ok(())
}

/// Test malformed elements outside the range do not affect the run
#[tokio::test]
async fn test_run_withMalformedElementOutsideRange_shouldTranslateRange() -> Result<()> {
    let source_dir = common::create_temp_dir()?;
    let source = common::create_test_file(
        source_dir.path(),
        "vol.json",
        r#"[
            {"title": "Chapter 1", "content": "first"},
            {"title": 2, "content": "second"},
            {"title": "Chapter 3", "content": null},
            17
        ]"#,
    )?;
    let output_dir = common::create_temp_dir()?;
    let translator = ScriptedTranslator::default();
    let runner = BatchRunner::new(translator.clone(), output_dir.path());

    let summary = runner.run(&source.to_string_lossy(), "1-1").await?;

    assert_eq!(summary.total, 1);
    assert_eq!(summary.translated, 1);
    let records = read_records(&summary.output_path)?;
    assert_eq!(records[0].title, "Chapter 1");
    assert_eq!(records[0].content, "FIRST");
    assert_eq!(translator.calls(), vec!["first"]);

    Ok(())
}

/// Test malformed elements inside the range become pass-through records
#[tokio::test]
async fn test_run_withMalformedElementInRange_shouldFallBackForIt() -> Result<()> {
    let source_dir = common::create_temp_dir()?;
    let source = common::create_test_file(
        source_dir.path(),
        "vol.json",
        r#"[
            {"title": "Chapter 1", "content": "first"},
            {"title": 2, "content": "second"},
            {"title": "Chapter 3", "content": null},
            17
        ]"#,
    )?;
    let output_dir = common::create_temp_dir()?;
    let translator = ScriptedTranslator::default();
    let runner = BatchRunner::new(translator.clone(), output_dir.path());

    let summary = runner.run(&source.to_string_lossy(), "2-4").await?;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.translated, 1);
    assert_eq!(summary.fallback, 2);

    let records = read_records(&summary.output_path)?;
    assert_eq!(records[0].title, "2");
    assert_eq!(records[0].content, "SECOND");
    assert!(!records[1].translated);
    assert_eq!(records[1].title, "Chapter 3");
    assert_eq!(records[1].model, FALLBACK_MODEL);
    assert!(!records[2].translated);
    assert_eq!(records[2].content, "17");
    assert_eq!(translator.calls(), vec!["second"]);

    Ok(())
}
