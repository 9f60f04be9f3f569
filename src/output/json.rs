//! JSON export of walk results
//!
//! The file holds one envelope object:
//! `{ "source", "scraped_at", "stats", "listings": [...] }`.

use crate::crawler::WalkReport;
use crate::listing::ListingRecord;
use crate::output::WalkStats;
use crate::KvartalError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct Envelope<'a> {
    source: &'a str,
    scraped_at: DateTime<Utc>,
    stats: &'a WalkStats,
    listings: &'a [ListingRecord],
}

/// Writes the listings of `report` as pretty-printed JSON
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `report` - The finished walk
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(KvartalError)` - Failed to create or write the file
pub fn write_listings_json(path: &Path, report: &WalkReport) -> Result<(), KvartalError> {
    let envelope = Envelope {
        source: &report.source,
        scraped_at: Utc::now(),
        stats: &report.stats,
        listings: &report.listings,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &envelope)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::debug!(
        "Wrote {} listings to {}",
        report.listings.len(),
        path.display()
    );

    Ok(())
}
