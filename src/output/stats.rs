//! Walk statistics
//!
//! Counters collected while a catalog walk runs, and a terminal renderer.

use serde::Serialize;

/// Walk statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Catalog pages that returned a document
    pub pages_fetched: u32,

    /// Catalog entries found across all fetched pages
    pub entries_seen: u64,

    /// Entries turned into records
    pub listings_extracted: u64,

    /// Entries dropped because of bad content or a missing detail page
    pub listings_skipped: u64,
}

impl WalkStats {
    /// Share of seen entries that produced a record, in percent
    pub fn success_rate(&self) -> f64 {
        if self.entries_seen == 0 {
            0.0
        } else {
            (self.listings_extracted as f64 / self.entries_seen as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(source: &str, stats: &WalkStats) {
    println!("=== {} ===", source);
    println!();
    println!("Pages fetched:      {}", stats.pages_fetched);
    println!("Entries seen:       {}", stats.entries_seen);
    println!("Listings extracted: {}", stats.listings_extracted);
    println!("Listings skipped:   {}", stats.listings_skipped);
    println!();
    println!(
        "Success Rate: {:.1}% ({} / {} entries extracted)",
        stats.success_rate(),
        stats.listings_extracted,
        stats.entries_seen
    );
}
