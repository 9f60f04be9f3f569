//! Listing extraction
//!
//! A catalog entry is turned into a [`ListingRecord`] in two phases:
//! 1. [`ListingExtractor::read_entry`] reads the image, detail link,
//!    location and price from the entry markup. This is synchronous and
//!    leaves nothing borrowed from the page.
//! 2. [`ListingExtractor::complete`] fetches the detail page and merges its
//!    feature table into the record.
//!
//! Splitting the phases means a catalog page can be released before any
//! detail page is requested.

use crate::config::{MarkerConfig, SelectorConfig};
use crate::crawler::DocumentFetcher;
use crate::listing::{parse_location, parse_price, zip_features, ListingRecord, Location};
use crate::markup::{attribute, text, ClassFilter, DocumentQuery};
use crate::url::normalize_detail_link;
use crate::KvartalError;
use scraper::{ElementRef, Html};
use std::sync::Arc;

/// Fields read from one catalog entry, before the detail page is fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Thumbnail URL, empty when the image carries no source
    pub img: String,

    /// Absolute detail-page URL
    pub detail_url: String,

    pub location: Location,

    pub price: u64,
}

/// Extracts normalized listing records from catalog entries
pub struct ListingExtractor {
    fetcher: Arc<DocumentFetcher>,
    base_url: String,
    markers: MarkerConfig,
    detail_link: ClassFilter,
    location: ClassFilter,
    price: ClassFilter,
    feature_label: ClassFilter,
    feature_value: ClassFilter,
}

impl ListingExtractor {
    /// Creates an extractor for one page family
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Used for detail pages
    /// * `base_url` - Site root for relative detail links
    /// * `selectors` - Class selectors for the catalog entry and detail page
    /// * `markers` - Price and location markers
    pub fn new(
        fetcher: Arc<DocumentFetcher>,
        base_url: impl Into<String>,
        selectors: &SelectorConfig,
        markers: &MarkerConfig,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            markers: markers.clone(),
            detail_link: ClassFilter::prefix(selectors.detail_link.as_str()),
            location: ClassFilter::exact(selectors.location.as_str()),
            price: ClassFilter::exact(selectors.price.as_str()),
            feature_label: ClassFilter::exact(selectors.feature_label.as_str()),
            feature_value: ClassFilter::exact(selectors.feature_value.as_str()),
        }
    }

    /// Extracts one listing, fetching its detail page
    ///
    /// # Errors
    ///
    /// * `KvartalError::MissingElement` - An expected element or attribute is absent
    /// * `KvartalError::Parse` - Price, location or link text is malformed
    /// * `KvartalError::DetailUnavailable` - The detail page could not be fetched
    pub async fn extract(&self, fragment: ElementRef<'_>) -> Result<ListingRecord, KvartalError> {
        let entry = self.read_entry(fragment)?;
        self.complete(entry).await
    }

    /// Reads the catalog-side fields of one entry
    pub fn read_entry(&self, fragment: ElementRef<'_>) -> Result<CatalogEntry, KvartalError> {
        let img = fragment
            .find_first("img", &ClassFilter::Any)
            .ok_or_else(|| KvartalError::MissingElement("img".to_string()))?;
        let img = match attribute(&img, "src").or_else(|| attribute(&img, "data-src")) {
            Some(src) => src.to_string(),
            None => {
                tracing::debug!("Catalog image has neither src nor data-src");
                String::new()
            }
        };

        let link = fragment
            .find_first("a", &self.detail_link)
            .ok_or_else(|| KvartalError::MissingElement(format!("a{}", self.detail_link)))?;
        let href = attribute(&link, "href")
            .ok_or_else(|| KvartalError::MissingElement("detail link href".to_string()))?;
        let detail_url = normalize_detail_link(
            href,
            &self.base_url,
            &self.markers.source_locale,
            &self.markers.canonical_locale,
        )?;

        let location = fragment
            .find_first("a", &self.location)
            .ok_or_else(|| KvartalError::MissingElement(format!("a{}", self.location)))?;
        let location = parse_location(&text(&location), &self.markers.street, &self.markers.city)?;

        let price = fragment
            .find_first("b", &self.price)
            .ok_or_else(|| KvartalError::MissingElement(format!("b{}", self.price)))?;
        let price = parse_price(&text(&price), &self.markers.currency)?;

        Ok(CatalogEntry {
            img,
            detail_url,
            location,
            price,
        })
    }

    /// Fetches the detail page of `entry` and builds the final record
    pub async fn complete(&self, entry: CatalogEntry) -> Result<ListingRecord, KvartalError> {
        let document = self
            .fetcher
            .fetch(&entry.detail_url)
            .await?
            .ok_or_else(|| KvartalError::DetailUnavailable {
                url: entry.detail_url.clone(),
            })?;

        let features = self.read_features(&document);
        tracing::debug!(
            url = %entry.detail_url,
            features = features.len(),
            "Extracted listing"
        );

        Ok(ListingRecord::new(entry.price, entry.img, entry.location, features))
    }

    /// Collects the detail page's feature table as label/value pairs
    pub fn read_features(&self, document: &Html) -> Vec<(String, String)> {
        let labels = document
            .find_all("div", &self.feature_label)
            .iter()
            .map(text)
            .collect();
        let values = document
            .find_all("div", &self.feature_value)
            .iter()
            .map(text)
            .collect();

        zip_features(labels, values)
    }
}
