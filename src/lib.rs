//! Longrun: finds games with long Any% world records
//!
//! This crate walks the speedrun.com catalog for a single platform and reports
//! every game whose fastest verified Any% run exceeds a configured duration.
//! All requests go through a rate-limited fetcher that waits out throttling
//! responses instead of failing.

pub mod api;
pub mod catalog;
pub mod config;
pub mod report;

use thiserror::Error;

/// Main error type for Longrun operations
#[derive(Debug, Error)]
pub enum LongrunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Cannot build endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Platform not found: {name}")]
    PlatformNotFound { name: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Longrun operations
pub type Result<T> = std::result::Result<T, LongrunError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{ApiClient, Paginator};
pub use catalog::{Game, GameEnumerator, GameFilter, GenreIds};
pub use config::Config;
pub use report::{ReportDriver, ReportSummary};
