//! Kvartal: a catalog scraper for real-estate classifieds
//!
//! This crate walks the paginated catalog of a single classifieds site,
//! fetches each listing's detail page and turns the markup into normalized
//! [`listing::ListingRecord`] values. Transient network failures are retried
//! with a fixed delay; a bad page or a bad listing never aborts the walk.

pub mod config;
pub mod crawler;
pub mod listing;
pub mod markup;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Kvartal operations
#[derive(Debug, Error)]
pub enum KvartalError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Connection failure for {url}: {message}")]
    ConnectionFailure { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Detail page unavailable: {url}")]
    DetailUnavailable { url: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::WalkState,
        to: state::WalkState,
    },

    #[error("Retries exhausted after {attempts} attempt(s): {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`KvartalError`]
///
/// A [`crawler::RetryPolicy`] is configured with exactly one kind; only
/// errors of that kind are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    InvalidArgument,
    ConnectionFailure,
    HttpStatus,
    Parse,
    MissingElement,
    DetailUnavailable,
    RetryExhausted,
    Other,
}

impl KvartalError {
    /// Returns the kind selector for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::ConnectionFailure { .. } => ErrorKind::ConnectionFailure,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Parse(_) => ErrorKind::Parse,
            Self::MissingElement(_) => ErrorKind::MissingElement,
            Self::DetailUnavailable { .. } => ErrorKind::DetailUnavailable,
            Self::RetryExhausted { .. } => ErrorKind::RetryExhausted,
            Self::InvalidTransition { .. }
            | Self::Client(_)
            | Self::Io(_)
            | Self::Serialization(_) => ErrorKind::Other,
        }
    }

    /// Returns true if the walker should drop the offending listing and move on
    pub fn skips_listing(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Parse | ErrorKind::MissingElement | ErrorKind::DetailUnavailable
        )
    }
}

/// Content-shape errors raised while normalizing scraped text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no currency marker '{marker}' in price '{raw}'")]
    MissingCurrency { marker: String, raw: String },

    #[error("price '{raw}' is not a number")]
    InvalidNumber { raw: String },

    #[error("no '{marker}' marker in location '{raw}'")]
    MissingMarker { marker: String, raw: String },

    #[error("no district token in location '{raw}'")]
    MissingDistrict { raw: String },

    #[error("invalid link '{raw}': {message}")]
    InvalidLink { raw: String, message: String },
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

/// Result type alias for Kvartal operations
pub type Result<T> = std::result::Result<T, KvartalError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CatalogWalker, DocumentFetcher, ListingExtractor, RetryPolicy};
pub use listing::{ListingRecord, Location};
pub use state::WalkState;
