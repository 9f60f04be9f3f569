//! Listing data model and text normalization
//!
//! This module owns the output unit of a walk, [`ListingRecord`], and the
//! small parsers that turn scraped text into its fields:
//! - price text to an integer amount
//! - free-text location to district and street
//! - detail-page label/value elements to feature pairs

mod features;
mod location;
mod price;
mod record;

pub use features::zip_features;
pub use location::{parse_location, Location};
pub use price::parse_price;
pub use record::ListingRecord;
