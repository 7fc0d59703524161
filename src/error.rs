//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-layer errors.
///
/// Transport failures only. Non-2xx statuses are not errors at this layer —
/// the dispatcher hands every received response back uninterpreted.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Local configuration errors, raised before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("No group id provided via the method call and none set")]
    MissingGroupIdentifier,
}
