//! Crawler module for catalog scraping
//!
//! This module contains the core scraping logic, including:
//! - Retrying operations with a fixed delay
//! - HTTP fetching into parsed documents
//! - Listing extraction from catalog entries and detail pages
//! - Catalog pagination

mod extractor;
mod fetcher;
mod retry;
mod walker;

pub use extractor::{CatalogEntry, ListingExtractor};
pub use fetcher::{build_http_client, DocumentFetcher};
pub use retry::RetryPolicy;
pub use walker::{CatalogWalker, WalkReport};

use crate::config::Config;
use crate::KvartalError;

/// Runs a complete catalog walk
///
/// This is the main entry point for scraping. It will:
/// 1. Build the HTTP client and retrying fetcher
/// 2. Walk the catalog pages from the seed URL
/// 3. Extract every listing and its detail-page features
///
/// # Arguments
///
/// * `config` - The validated scraper configuration
///
/// # Returns
///
/// * `Ok(WalkReport)` - Listings and statistics, possibly empty
/// * `Err(KvartalError)` - The walk could not be set up or advanced
pub async fn scrape(config: &Config) -> Result<WalkReport, KvartalError> {
    let walker = CatalogWalker::from_config(config)?;
    tracing::info!("{}", walker);
    walker.run().await
}
