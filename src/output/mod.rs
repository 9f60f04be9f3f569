//! Output module for walk results
//!
//! This module handles:
//! - Writing scraped listings to a JSON file
//! - Counting and printing walk statistics

mod json;
pub mod stats;

pub use json::write_listings_json;
pub use stats::{print_statistics, WalkStats};
