/*!
 * Source item loading.
 *
 * Items come from a JSON array served over HTTP(S), or from a local copy
 * given as a `file://` URL or a plain path.
 */

use log::debug;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::errors::{json_kind, SourceError};

/// One entry of the source array
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceItem {
    /// Item title, carried to the output unchanged
    pub title: String,
    /// Text to translate
    pub content: String,
}

/// Where the source array lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Fetched with an HTTP GET
    Remote(Url),
    /// Read from disk
    Local(PathBuf),
}

impl SourceLocation {
    /// Classify a user supplied URL or path
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::Local(path),
                Err(()) => Self::Local(PathBuf::from(url.path())),
            },
            // Bare paths, including Windows drive letters parsed as schemes
            _ => Self::Local(PathBuf::from(location)),
        }
    }

    /// File name the output is named after: the last path segment without a `.json` suffix
    pub fn base_name(&self) -> String {
        let last_segment = match self {
            Self::Remote(url) => url.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string),
            Self::Local(path) => path.file_name().map(|name| name.to_string_lossy().into_owned()),
        };

        let name = last_segment.unwrap_or_default();
        let name = name.strip_suffix(".json").unwrap_or(&name);
        if name.is_empty() {
            "source".to_string()
        } else {
            name.to_string()
        }
    }
}

/// Convenience wrapper around `SourceLocation::base_name`
pub fn source_base_name(location: &str) -> String {
    SourceLocation::parse(location).base_name()
}

/// Check that the top-level `value` is an array and hand back its elements.
///
/// Elements are left untouched; each one is read with `read_item` only when
/// it falls inside the selected range.
pub fn source_array(value: serde_json::Value) -> Result<Vec<serde_json::Value>, SourceError> {
    match value {
        serde_json::Value::Array(elements) => Ok(elements),
        other => Err(SourceError::NotAnArray(json_kind(&other))),
    }
}

/// Read the element at 1-based `index` as an item.
///
/// The title is taken as-is (non-string titles as their JSON text, a missing
/// one as empty). The content must be a string: anything else, or an element
/// that is not an object, is malformed.
pub fn read_item(index: usize, element: &serde_json::Value) -> Result<SourceItem, SourceError> {
    let malformed = |message: String| SourceError::MalformedItem { index, message };

    let fields = element.as_object()
        .ok_or_else(|| malformed(format!("expected an object, found {}", json_kind(element))))?;

    let content = match fields.get("content") {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => return Err(malformed(format!("content should be a string, found {}", json_kind(other)))),
        None => return Err(malformed("content is missing".to_string())),
    };

    Ok(SourceItem {
        title: json_text(fields.get("title")),
        content,
    })
}

/// Strings as-is, `null` or absent as empty, anything else as JSON text
fn json_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

impl SourceItem {
    /// Best-effort view of an element `read_item` rejected
    pub fn lossy(element: &serde_json::Value) -> Self {
        match element.as_object() {
            Some(fields) => Self {
                title: json_text(fields.get("title")),
                content: json_text(fields.get("content")),
            },
            None => Self {
                title: String::new(),
                content: json_text(Some(element)),
            },
        }
    }
}

/// Loads the source array
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    /// HTTP client for remote sources
    client: Client,
}

impl Default for SourceFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl SourceFetcher {
    /// Create a fetcher whose HTTP requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the array at `location`; only the top-level shape is validated
    pub async fn fetch(&self, location: &str) -> Result<Vec<serde_json::Value>, SourceError> {
        let body = match SourceLocation::parse(location) {
            SourceLocation::Remote(url) => self.fetch_remote(url).await?,
            SourceLocation::Local(path) => Self::read_local(&path).await?,
        };

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| SourceError::InvalidJson(e.to_string()))?;

        source_array(value)
    }

    async fn fetch_remote(&self, url: Url) -> Result<String, SourceError> {
        debug!("Fetching source from {}", url);
        let location = url.to_string();

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| SourceError::Fetch { location: location.clone(), message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { location, status_code: status.as_u16() });
        }

        response.text().await
            .map_err(|e| SourceError::Fetch { location, message: e.to_string() })
    }

    async fn read_local(path: &Path) -> Result<String, SourceError> {
        debug!("Reading source from {:?}", path);
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
