//! Catalog walker - pagination and per-page orchestration
//!
//! The walker fetches catalog pages in increasing page order, extracts every
//! entry on a page in document order and advances the page parameter by one
//! until the page cap is reached or a page cannot be fetched.

use crate::config::Config;
use crate::crawler::extractor::CatalogEntry;
use crate::crawler::{DocumentFetcher, ListingExtractor};
use crate::listing::ListingRecord;
use crate::markup::{ClassFilter, DocumentQuery};
use crate::output::WalkStats;
use crate::state::WalkState;
use crate::url::{next_page_url, page_number};
use crate::KvartalError;
use scraper::Html;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Everything a walk produced
#[derive(Debug, Clone, Serialize)]
pub struct WalkReport {
    /// Source description from the configuration
    pub source: String,

    pub stats: WalkStats,

    /// Records in page order, then document order
    pub listings: Vec<ListingRecord>,
}

/// Drives pagination over a catalog
pub struct CatalogWalker {
    name: String,
    seed_url: String,
    page_param: String,
    max_pages: u32,
    stop_on_empty_page: bool,
    catalog_entry: ClassFilter,
    fetcher: Arc<DocumentFetcher>,
    extractor: ListingExtractor,
}

impl CatalogWalker {
    /// Creates a walker with its own fetcher built from `config`
    pub fn from_config(config: &Config) -> Result<Self, KvartalError> {
        let fetcher = DocumentFetcher::from_config(&config.http, &config.retry)?;
        Self::new(config, Arc::new(fetcher))
    }

    /// Creates a walker sharing `fetcher` between catalog and detail pages
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogWalker)` - Ready to run
    /// * `Err(KvartalError::InvalidArgument)` - The seed URL has no numeric
    ///   page parameter
    pub fn new(config: &Config, fetcher: Arc<DocumentFetcher>) -> Result<Self, KvartalError> {
        let catalog = &config.catalog;
        page_number(&catalog.seed_url, &catalog.page_param)?;

        let extractor = ListingExtractor::new(
            Arc::clone(&fetcher),
            catalog.base_url.as_str(),
            &config.selectors,
            &config.markers,
        );

        Ok(Self {
            name: config.name.clone(),
            seed_url: catalog.seed_url.clone(),
            page_param: catalog.page_param.clone(),
            max_pages: catalog.max_pages,
            stop_on_empty_page: catalog.stop_on_empty_page,
            catalog_entry: ClassFilter::prefix(config.selectors.catalog_entry.as_str()),
            fetcher,
            extractor,
        })
    }

    /// Runs the walk and returns only the records
    pub async fn extract_all(&self) -> Result<Vec<ListingRecord>, KvartalError> {
        Ok(self.run().await?.listings)
    }

    /// Runs the walk
    ///
    /// Exactly `max_pages` catalog fetches are made unless a fetch yields no
    /// document, which ends the walk with whatever was gathered so far.
    /// Listings that fail extraction are logged and skipped.
    ///
    /// # Returns
    ///
    /// * `Ok(WalkReport)` - Possibly empty results with statistics
    /// * `Err(KvartalError)` - A structural error, such as a catalog URL that
    ///   can no longer be advanced
    pub async fn run(&self) -> Result<WalkReport, KvartalError> {
        tracing::info!("Starting walk of {} from {}", self.name, self.seed_url);

        let mut report = WalkReport {
            source: self.name.clone(),
            stats: WalkStats::default(),
            listings: Vec::new(),
        };
        let mut url = self.seed_url.clone();
        let mut pages_attempted = 0u32;
        let mut pending: Vec<Result<CatalogEntry, KvartalError>> = Vec::new();
        let mut state = WalkState::Start;

        while !state.is_terminal() {
            let next = match state {
                WalkState::Start => WalkState::FetchingPage,

                WalkState::FetchingPage => {
                    if pages_attempted >= self.max_pages {
                        tracing::info!("Reached page limit of {}", self.max_pages);
                        WalkState::Done
                    } else {
                        pages_attempted += 1;
                        let entries = self.fetch_page(&url).await?;
                        match entries {
                            Some(entries) => {
                                report.stats.pages_fetched += 1;
                                pending = entries;
                                tracing::info!(
                                    "Page {} ({}): {} entries",
                                    pages_attempted,
                                    url,
                                    pending.len()
                                );
                                WalkState::ExtractingListings
                            }
                            None => {
                                tracing::warn!("Could not fetch {}, ending walk", url);
                                WalkState::Done
                            }
                        }
                    }
                }

                WalkState::ExtractingListings => {
                    let found = pending.len();
                    report.stats.entries_seen += found as u64;

                    for entry in pending.drain(..) {
                        self.process_entry(entry, &mut report).await?;
                    }

                    if found == 0 && self.stop_on_empty_page {
                        tracing::info!("Empty catalog page at {}, ending walk", url);
                        WalkState::Done
                    } else {
                        if pages_attempted < self.max_pages {
                            url = next_page_url(&url, &self.page_param)?;
                        }
                        WalkState::FetchingPage
                    }
                }

                WalkState::Done => WalkState::Done,
            };

            if !state.can_transition_to(next) {
                return Err(KvartalError::InvalidTransition {
                    from: state,
                    to: next,
                });
            }
            tracing::trace!(from = %state, to = %next, "Walk state change");
            state = next;
        }

        tracing::info!(
            "Walk complete: {} listings from {} pages ({} skipped)",
            report.stats.listings_extracted,
            report.stats.pages_fetched,
            report.stats.listings_skipped
        );

        Ok(report)
    }

    /// Fetches a catalog page and reads its entries before the document is
    /// dropped. `None` means the page could not be fetched.
    async fn fetch_page(
        &self,
        url: &str,
    ) -> Result<Option<Vec<Result<CatalogEntry, KvartalError>>>, KvartalError> {
        let document = match self.fetcher.fetch(url).await? {
            Some(document) => document,
            None => return Ok(None),
        };
        Ok(Some(self.read_entries(&document)))
    }

    /// Lifts every catalog entry on a page into an owned value
    fn read_entries(&self, document: &Html) -> Vec<Result<CatalogEntry, KvartalError>> {
        document
            .find_all("section", &self.catalog_entry)
            .into_iter()
            .map(|fragment| self.extractor.read_entry(fragment))
            .collect()
    }

    async fn process_entry(
        &self,
        entry: Result<CatalogEntry, KvartalError>,
        report: &mut WalkReport,
    ) -> Result<(), KvartalError> {
        let result = match entry {
            Ok(entry) => self.extractor.complete(entry).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(record) => {
                report.stats.listings_extracted += 1;
                report.listings.push(record);
                Ok(())
            }
            Err(e) if e.skips_listing() => {
                tracing::warn!("Skipping listing: {}", e);
                report.stats.listings_skipped += 1;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for CatalogWalker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scraper for {} source.", self.name)
    }
}
