use anyhow::{Result, Context};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Duration;
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::source::SourceFetcher;
use crate::translation::{BatchRunner, BatchSummary, TranslationClient};

// @module: Application controller for batch translation

/// Main application controller for batch translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Whether to draw a progress bar
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .context("Configuration validation failed")?;

        Ok(Self {
            config,
            show_progress: false,
        })
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Directory result files go to: the configured one, or `results/` beside the executable
    pub fn results_dir(&self) -> PathBuf {
        self.config.output.results_dir
            .clone()
            .unwrap_or_else(FileManager::default_results_dir)
    }

    /// Run the main workflow for a source URL and a range specification
    pub async fn run(&self, source_url: &str, range_spec: &str) -> Result<BatchSummary> {
        let start_time = std::time::Instant::now();
        let translation = &self.config.translation;

        debug!("Using model {} at {}", translation.model, translation.endpoint);

        let fetcher = SourceFetcher::new(Duration::from_secs(translation.timeout_secs));
        let runner = BatchRunner::new(TranslationClient::from_config(translation), self.results_dir())
            .with_fetcher(fetcher)
            .with_progress(self.show_progress);

        let summary = runner.run(source_url, range_spec).await?;

        info!("Finished {} item(s) in {:.1}s", summary.total, start_time.elapsed().as_secs_f64());

        Ok(summary)
    }
}
