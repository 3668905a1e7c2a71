//! Aggregation facade.
//!
//! Composes the bucketing, temporal, and ranking passes over one record
//! batch into a single [`AggregationSnapshot`]. Each call returns a fully
//! independent snapshot; re-running with different filter criteria never
//! contaminates an earlier result.

use chrono::Utc;
use quake_core::models::{AggregationConfig, AggregationSnapshot, EventRecord, SnapshotMetadata};
use tracing::debug;

use crate::aggregator::{band_counts, country_counts, month_year_counts, year_month_matrix};
use crate::filter::FilterCriteria;
use crate::ranker::top_by_magnitude;

// ── Public functions ──────────────────────────────────────────────────────────

/// Aggregate one record batch into a snapshot.
///
/// A partially malformed batch still produces a best-effort snapshot over
/// the valid subset; an empty batch yields empty and zeroed structures,
/// never an error.
pub fn build_snapshot(records: &[EventRecord], config: &AggregationConfig) -> AggregationSnapshot {
    let metadata = SnapshotMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_total: records.len(),
        records_with_magnitude: records.iter().filter(|r| r.magnitude.is_some()).count(),
        records_with_timestamp: records.iter().filter(|r| r.timestamp.is_some()).count(),
        records_with_coordinates: records.iter().filter(|r| r.coordinates.is_some()).count(),
    };

    let snapshot = AggregationSnapshot {
        band_labels: config.bands.band_labels(),
        band_counts: band_counts(records, &config.bands),
        country_counts: country_counts(records),
        year_month_matrix: year_month_matrix(records),
        month_year_counts: month_year_counts(records),
        top_events: top_by_magnitude(records, config.top_n),
        metadata,
    };

    debug!(
        "Built snapshot: {} records, {} countries, {} years, top {} events",
        snapshot.metadata.records_total,
        snapshot.country_counts.len(),
        snapshot.year_month_matrix.len(),
        snapshot.top_events.len(),
    );

    snapshot
}

/// Filter the batch by `criteria`, then aggregate the subset.
pub fn analyze_events(
    records: &[EventRecord],
    config: &AggregationConfig,
    criteria: &FilterCriteria,
) -> AggregationSnapshot {
    let subset = criteria.apply(records);
    build_snapshot(&subset, config)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
