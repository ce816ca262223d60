/*!
 * Core translation client implementation.
 *
 * This module contains the `TranslationClient`, which sends one piece of
 * content to a provider and turns every failure into a pass-through outcome
 * instead of an error.
 */

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::app_config::TranslationConfig;
use crate::providers::Provider;
use crate::providers::gemini::Gemini;

/// Model label recorded when the content was passed through untranslated
pub const FALLBACK_MODEL: &str = "google translate";

/// Result of translating one piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    /// True when the primary model produced the content
    pub translated: bool,
    /// Translated text, or the original text on failure
    pub content: String,
    /// Model that produced the content, or `FALLBACK_MODEL`
    pub model: String,
}

impl TranslationOutcome {
    /// Successful translation by `model`
    pub fn success(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            translated: true,
            content: content.into(),
            model: model.into(),
        }
    }

    /// Original content passed through untouched
    pub fn fallback(original: impl Into<String>) -> Self {
        Self {
            translated: false,
            content: original.into(),
            model: FALLBACK_MODEL.to_string(),
        }
    }
}

/// Anything that can translate a single piece of content.
///
/// Implementations never fail: problems are reported through
/// `TranslationOutcome::translated`.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate `content`
    async fn translate(&self, content: &str) -> TranslationOutcome;

    /// Label of the primary model, used in run summaries
    fn primary_model(&self) -> &str;
}

/// Translation client wrapping a single provider
#[derive(Debug)]
pub struct TranslationClient<P: Provider> {
    /// Provider implementation
    provider: P,

    /// System instruction sent with every request
    system_prompt: String,
}

impl TranslationClient<Gemini> {
    /// Create a Gemini-backed client from configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        let provider = Gemini::with_timeout(
            config.resolve_api_key(),
            config.endpoint.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .temperature(config.temperature);

        Self::new(provider, config.system_prompt.clone())
    }
}

impl<P: Provider> TranslationClient<P> {
    /// Create a new client for `provider`
    pub fn new(provider: P, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
        }
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// System instruction sent with every request
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait]
impl<P: Provider> Translate for TranslationClient<P> {
    async fn translate(&self, content: &str) -> TranslationOutcome {
        let start_time = Instant::now();
        let request = self.provider.build_request(&self.system_prompt, content);

        match self.provider.complete(request).await {
            Ok(response) => {
                let text = P::extract_text(&response);
                if text.is_empty() {
                    warn!("Translation error: empty response from {}", self.provider.model_name());
                    return TranslationOutcome::fallback(content);
                }

                debug!("{} responded in {:?}", self.provider.model_name(), start_time.elapsed());
                TranslationOutcome::success(text, self.provider.model_name())
            }
            Err(e) => {
                warn!("Translation error: {}", e);
                TranslationOutcome::fallback(content)
            }
        }
    }

    fn primary_model(&self) -> &str {
        self.provider.model_name()
    }
}
