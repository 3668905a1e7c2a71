use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::buckets::BandScheme;

// ── EventRecord ───────────────────────────────────────────────────────────────

/// Geographic position of one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Depth in kilometres; negative values sit above the sea-level
    /// reference. Absent when the feed ships a 2-element coordinate array.
    pub depth_km: Option<f64>,
}

/// One earthquake event normalized from the feed.
///
/// Fields the feed omitted or shipped malformed are `None`; every aggregate
/// skips records missing the field it needs, so a partially valid record
/// still counts wherever it can.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event magnitude. `None` when missing or non-finite in the feed.
    pub magnitude: Option<f64>,
    /// Free-form place description, e.g. `"12 km NE of Ridgecrest, CA"`.
    #[serde(default)]
    pub place: String,
    /// Event time (UTC). `None` when the feed value was unparsable.
    pub timestamp: Option<DateTime<Utc>>,
    /// Event position. `None` when the coordinate array was malformed.
    pub coordinates: Option<Coordinates>,
}

impl EventRecord {
    /// The calendar year of the event, when a timestamp is present.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.timestamp.map(|ts| ts.year())
    }

    /// The 0-based calendar month (January = 0), when a timestamp is present.
    pub fn month0(&self) -> Option<u32> {
        use chrono::Datelike;
        self.timestamp.map(|ts| ts.month0())
    }
}

// ── Aggregation configuration ─────────────────────────────────────────────────

/// Knobs for one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Magnitude band boundaries for the histogram.
    pub bands: BandScheme,
    /// How many top-magnitude events the ranking keeps.
    pub top_n: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            bands: BandScheme::default(),
            top_n: 20,
        }
    }
}

// ── AggregationSnapshot ───────────────────────────────────────────────────────

/// Record-validity tallies produced alongside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// ISO-8601 timestamp when this snapshot was generated.
    pub generated_at: String,
    /// Number of records fed into the aggregation.
    pub records_total: usize,
    /// Records carrying a usable magnitude.
    pub records_with_magnitude: usize,
    /// Records carrying a usable timestamp.
    pub records_with_timestamp: usize,
    /// Records carrying usable coordinates.
    pub records_with_coordinates: usize,
}

/// One immutable, fully computed aggregation result.
///
/// A snapshot is produced per feed arrival and per filter change; it is
/// never mutated in place and holds no references into the raw record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSnapshot {
    /// Label per magnitude band, in band order.
    pub band_labels: Vec<String>,
    /// Count of magnitude-carrying records per band, aligned with
    /// `band_labels`.
    pub band_counts: Vec<u64>,
    /// Events per country/region key.
    pub country_counts: BTreeMap<String, u64>,
    /// Events per year, split into a fixed 12-month row (January = index 0).
    /// Years absent from the input never appear.
    pub year_month_matrix: BTreeMap<i32, [u64; 12]>,
    /// Flat `"{month+1}-{year}"` → count map.
    pub month_year_counts: BTreeMap<String, u64>,
    /// The highest-magnitude events, descending, ties in feed order.
    pub top_events: Vec<EventRecord>,
    /// Validity tallies for this run.
    pub metadata: SnapshotMetadata,
}

impl AggregationSnapshot {
    /// Sum of all band counts, i.e. the number of records with a valid
    /// magnitude.
    pub fn banded_total(&self) -> u64 {
        self.band_counts.iter().sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
