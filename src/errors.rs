/*!
 * Error types for the chapterlate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while loading the source item array
#[derive(Error, Debug)]
pub enum SourceError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("Failed to fetch source '{location}': {message}")]
    Fetch {
        /// URL or path being fetched
        location: String,
        /// Underlying failure
        message: String,
    },

    /// The server answered with a non-success status
    #[error("Source '{location}' responded with HTTP {status_code}")]
    Status {
        /// URL being fetched
        location: String,
        /// HTTP status code
        status_code: u16,
    },

    /// The payload is not valid JSON
    #[error("Source payload is not valid JSON: {0}")]
    InvalidJson(String),

    /// The top-level JSON value is not an array
    #[error("Invalid JSON format: expected an array, found {0}")]
    NotAnArray(&'static str),

    /// An array element could not be read as an item
    #[error("Item {index} is malformed: {message}")]
    MalformedItem {
        /// 1-based position of the element
        index: usize,
        /// Why the element was rejected
        message: String,
    },

    /// Local source file could not be read
    #[error("Failed to read source file: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Name of a JSON value's kind, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
