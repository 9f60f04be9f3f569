//! Configuration module for Kvartal
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use kvartal::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("kvartal.toml")).unwrap();
//! println!("Walking {} pages from {}", config.catalog.max_pages, config.catalog.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, HttpConfig, MarkerConfig, OutputConfig, RetryConfig, SelectorConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_retry_bounds, DELAY_RANGE, MAX_RETRY_BUDGET};
