//! Error types for the job posting aggregator.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for crawl and sync operations
//! - `Result<T>`: Type alias for Results using AppError
//!
//! Only `AppError::Config` is fatal for a run. Everything else is recovered by
//! the caller and reported as a value (see `domain::models::SourceFailure`).

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for crawl and sync operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid run configuration (e.g. a relative store address)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed or returned a non-success status
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Failed to parse HTML or JSON content
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Remote job store rejected a read or write
    #[error("Store error: {0}")]
    StoreError(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::NetworkError(error.to_string())
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_distinct() {
        let err = AppError::config("store url must be absolute");
        assert!(err.is_config());
        assert!(!AppError::network("timeout").is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: store url must be absolute"
        );
    }

    #[test]
    fn test_url_parse_error_maps_to_invalid_url() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }
}
