/*!
 * Batch translation processing.
 *
 * This module runs one pass over a range of source items: fetch, select,
 * translate each item in order, write the results once, and report counts.
 */

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::source::{read_item, SourceFetcher, SourceItem, SourceLocation};

use super::core::{Translate, TranslationOutcome, FALLBACK_MODEL};
use super::range::ItemRange;

/// One record of the output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Title of the source item
    pub title: String,
    /// Translated or original content
    pub content: String,
    /// Whether the primary model produced `content`
    pub translated: bool,
    /// Model label
    pub model: String,
}

impl ResultRecord {
    /// Combine a source item with its translation outcome
    pub fn new(item: &SourceItem, outcome: TranslationOutcome) -> Self {
        Self {
            title: item.title.clone(),
            content: outcome.content,
            translated: outcome.translated,
            model: outcome.model,
        }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items selected from the source
    pub range: ItemRange,
    /// Length of the source array
    pub source_len: usize,
    /// Records written
    pub total: usize,
    /// Records translated by the primary model
    pub translated: usize,
    /// Records passed through untranslated
    pub fallback: usize,
    /// Primary model label
    pub model: String,
    /// File the records were written to
    pub output_path: PathBuf,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Translation summary:")?;
        writeln!(f, "- Successfully translated ({}): {}", self.model, self.translated)?;
        writeln!(f, "- Failed to translate ({}): {}", FALLBACK_MODEL, self.fallback)?;
        write!(f, "Translated results saved to {}", self.output_path.display())
    }
}

/// Sequential batch runner
pub struct BatchRunner<T: Translate> {
    /// The translator used for every item
    translator: T,

    /// Loads the source array
    fetcher: SourceFetcher,

    /// Directory result files are written to
    output_dir: PathBuf,

    /// Whether to draw a progress bar on stderr
    show_progress: bool,
}

impl<T: Translate> BatchRunner<T> {
    /// Create a new runner writing into `output_dir`
    pub fn new(translator: T, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            translator,
            fetcher: SourceFetcher::default(),
            output_dir: output_dir.into(),
            show_progress: false,
        }
    }

    /// Use a custom source fetcher
    pub fn with_fetcher(mut self, fetcher: SourceFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Directory result files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run the whole pipeline for `source_url` and `range_spec`.
    ///
    /// Only loading the source or writing the output can fail; translation
    /// failures end up in the records.
    pub async fn run(&self, source_url: &str, range_spec: &str) -> Result<BatchSummary> {
        let items = self.fetcher.fetch(source_url).await
            .with_context(|| format!("Error fetching JSON from {}", source_url))?;

        let range = ItemRange::parse(range_spec, items.len());
        let output_path = FileManager::generate_output_path(
            &SourceLocation::parse(source_url).base_name(),
            &self.output_dir,
            &range,
        );

        let summary = self.process_items(&items, range, output_path).await?;
        self.report(&summary);

        Ok(summary)
    }

    /// Translate `range` of the source elements and write the records to `output_path`.
    ///
    /// Elements are read one at a time; a malformed element inside the range
    /// becomes a pass-through record instead of stopping the run.
    pub async fn process_items(
        &self,
        items: &[serde_json::Value],
        range: ItemRange,
        output_path: PathBuf,
    ) -> Result<BatchSummary> {
        info!("Processing items {} to {} of {}", range.start, range.end, items.len());

        FileManager::ensure_dir(&self.output_dir)?;

        let progress_bar = self.progress_bar(range.len() as u64);
        let mut records = Vec::with_capacity(range.len());
        let mut translated = 0;
        let mut fallback = 0;

        for index in range.indices() {
            let Some(element) = items.get(index) else {
                break;
            };

            let (item, outcome) = match read_item(index + 1, element) {
                Ok(item) => {
                    info!("Translating item {}: {}", index + 1, item.title);
                    progress_bar.set_message(item.title.clone());

                    let outcome = self.translator.translate(&item.content).await;
                    (item, outcome)
                }
                Err(e) => {
                    warn!("Passing item {} through untranslated: {}", index + 1, e);
                    let item = SourceItem::lossy(element);
                    let outcome = TranslationOutcome::fallback(item.content.clone());
                    (item, outcome)
                }
            };

            if outcome.translated {
                translated += 1;
            } else {
                fallback += 1;
            }

            records.push(ResultRecord::new(&item, outcome));
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let json = serde_json::to_string_pretty(&records)
            .context("Failed to serialize translated items")?;
        FileManager::write_to_file(&output_path, &json)?;

        Ok(BatchSummary {
            range,
            source_len: items.len(),
            total: records.len(),
            translated,
            fallback,
            model: self.translator.primary_model().to_string(),
            output_path,
        })
    }

    fn report(&self, summary: &BatchSummary) {
        if summary.fallback > 0 {
            warn!(
                "{} of {} item(s) were left untranslated",
                summary.fallback, summary.total
            );
        }
        info!("Translated results saved to {}", summary.output_path.display());
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar
    }
}
