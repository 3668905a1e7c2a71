//! Bucketed counts over event records.
//!
//! Every function here is a pure pass over a record slice: magnitude-band
//! histogram, per-country counts, and the two temporal views (year×month
//! matrix plus the flat month-year map). Records missing the field an
//! aggregate needs are skipped by that aggregate only.

use std::collections::BTreeMap;

use quake_core::buckets::{country_key, BandScheme};
use quake_core::models::EventRecord;
use tracing::debug;

// ── Magnitude bands ───────────────────────────────────────────────────────────

/// Count magnitude-carrying records per band, aligned with the scheme's
/// band order.
pub fn band_counts(records: &[EventRecord], scheme: &BandScheme) -> Vec<u64> {
    let mut counts = vec![0u64; scheme.band_count()];
    for record in records {
        if let Some(magnitude) = record.magnitude {
            counts[scheme.band_index(magnitude)] += 1;
        }
    }
    counts
}

// ── Country counts ────────────────────────────────────────────────────────────

/// Count records per country/region key derived from the `place` text.
///
/// Records with an empty place are keyed under the empty string rather than
/// dropped, so the totals stay reconcilable with the input size.
pub fn country_counts(records: &[EventRecord]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(country_key(&record.place).to_string()).or_insert(0) += 1;
    }
    counts
}

// ── Temporal aggregation ──────────────────────────────────────────────────────

/// Build the year → 12-month count matrix (January = index 0).
///
/// Years with no records never appear as keys; there is no zero-filling
/// across years. Records without a timestamp are skipped.
pub fn year_month_matrix(records: &[EventRecord]) -> BTreeMap<i32, [u64; 12]> {
    let mut matrix: BTreeMap<i32, [u64; 12]> = BTreeMap::new();
    for record in records {
        if let (Some(year), Some(month)) = (record.year(), record.month0()) {
            matrix.entry(year).or_insert([0; 12])[month as usize] += 1;
        }
    }
    debug!("Year-month matrix spans {} years", matrix.len());
    matrix
}

/// Build the flat `"{month+1}-{year}"` → count map.
///
/// The key format matches the feed consumers' month-year axis labels.
pub fn month_year_counts(records: &[EventRecord]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        if let (Some(year), Some(month)) = (record.year(), record.month0()) {
            *counts.entry(format!("{}-{}", month + 1, year)).or_insert(0) += 1;
        }
    }
    counts
}

// ── Tests ─────────────────────────────────────────────────────────────────────
