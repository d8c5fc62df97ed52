//! Error kinds shared by the tools.
//!
//! Startup errors are always fatal. Transport errors are handled per tool.
//! Response format errors never leave the interpreter that raised them: the
//! caller logs them and substitutes a fallback value.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Missing credentials or unusable static input.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "{key_env} not found!\nPlease either:\n  1. Create a .env file with: {key_env}=your-api-key-here\n  2. Set environment variable: export {key_env}='your-api-key-here'"
    )]
    MissingApiKey { key_env: &'static str },
    #[error("Catalog file '{}' not found", path.display())]
    CatalogNotFound { path: PathBuf },
    #[error("Failed to read catalog file '{}': {source}", path.display())]
    CatalogUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in catalog file '{}': {source}", path.display())]
    CatalogMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid record in catalog file '{}': {reason}", path.display())]
    CatalogRecord { path: PathBuf, reason: String },
    #[error("Audio file not found: {}", path.display())]
    AudioNotFound { path: PathBuf },
    #[error("{0}")]
    Config(String),
}

/// Network or API failure during an inference call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("response from {endpoint} did not contain message content")]
    EmptyResponse { endpoint: String },
    #[error("failed to read audio file '{}': {source}", path.display())]
    AudioRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A model reply that does not match the shape the caller asked for.
#[derive(Debug, Error)]
pub enum ResponseFormatError {
    #[error("model did not call the expected function '{expected}'")]
    MissingFunctionCall { expected: &'static str },
    #[error("could not decode function arguments: {0}")]
    InvalidArguments(String),
    #[error("duration estimate '{0}' is not a number")]
    NonNumericDuration(String),
    #[error("duration estimate {0} is not a positive number of minutes")]
    NonPositiveDuration(f64),
    #[error("duration estimate of {0} minutes gives no usable speaking rate")]
    ImplausibleDuration(f64),
    #[error("topics response is not a JSON array of topics: {0}")]
    InvalidTopics(serde_json::Error),
}

/// Error returned by command entry points.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Console I/O failed: {0}")]
    Console(std::io::Error),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
