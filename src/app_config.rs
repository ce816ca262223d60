use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use log::warn;
use url::Url;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output config
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key, falls back to the environment when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System instruction sent with every item
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    /// Left to the provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
            temperature: None,
        }
    }
}

impl TranslationConfig {
    /// Get the API key, reading `GEMINI_API_KEY` then `GOOGLE_API_KEY` when the config leaves it empty
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }

        API_KEY_ENV_VARS.iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
    }
}

/// Environment variables consulted for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Output location configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Directory for result files; defaults to `results/` next to the executable's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<PathBuf>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_system_prompt() -> String {
    "You are a strict translator. Do not modify the story, characters, or intent. \
Preserve all names of people, but translate techniques/props/places/organizations when readability benefits. \
Prioritize natural English flow while keeping the original's tone (humor, sarcasm, etc.). \
For idioms or culturally specific terms, translate literally if possible; otherwise, adapt with a footnote. \
Dialogue must match the original's bluntness or subtlety, including punctuation.".to_string()
}

impl Config {
    /// Load configuration from a JSON file, writing a default one when it does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        let translation = &self.translation;

        if translation.model.trim().is_empty() {
            return Err(AppError::Config("Model name must not be empty".to_string()));
        }

        if translation.resolve_api_key().is_empty() {
            return Err(AppError::Config(format!(
                "Translation API key is required: set translation.api_key or one of {}",
                API_KEY_ENV_VARS.join(", ")
            )));
        }

        match Url::parse(&translation.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(AppError::Config(format!(
                    "Unsupported endpoint scheme '{}' in {}", url.scheme(), translation.endpoint
                )));
            }
            Err(e) => {
                return Err(AppError::Config(format!(
                    "Invalid endpoint URL '{}': {}", translation.endpoint, e
                )));
            }
        }

        if translation.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be greater than zero".to_string()));
        }

        if let Some(temperature) = translation.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(AppError::Config(format!(
                    "temperature must be between 0.0 and 2.0, got {}", temperature
                )));
            }
        }

        Ok(())
    }
}
