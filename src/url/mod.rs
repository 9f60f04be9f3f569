//! URL handling module for Kvartal
//!
//! This module provides the two URL transformations a catalog walk needs:
//! turning a scraped detail link into an absolute URL, and advancing a
//! catalog URL to its next page.

mod normalize;
mod paginate;

pub use normalize::normalize_detail_link;
pub use paginate::{next_page_url, page_number, PAGE_STEP};
