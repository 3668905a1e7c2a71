//! Record subsetting by year and minimum magnitude.
//!
//! The filter engine is pure and idempotent: it returns a fresh record
//! vector and never touches the input or any shared state. The consumer
//! re-feeds the subset through the aggregation facade on every selection
//! change.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use quake_core::models::EventRecord;
use quake_core::QuakeError;
use serde::{Deserialize, Serialize};

// ── YearFilter ────────────────────────────────────────────────────────────────

/// Year selection: either the `"all"` sentinel or one specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearFilter {
    /// No year constraint.
    All,
    /// Only records from this calendar year.
    Year(i32),
}

impl FromStr for YearFilter {
    type Err = QuakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            // The length check guarantees the parse cannot fail.
            return Ok(Self::Year(trimmed.parse().unwrap_or_default()));
        }
        Err(QuakeError::InvalidYearFilter(s.to_string()))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Year(year) => write!(f, "{}", year),
        }
    }
}

// ── FilterCriteria ────────────────────────────────────────────────────────────

/// The (year, minimum magnitude) selection applied before re-aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Year constraint.
    pub year: YearFilter,
    /// Inclusive magnitude lower bound.
    pub min_magnitude: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            year: YearFilter::All,
            min_magnitude: 0.0,
        }
    }
}

impl FilterCriteria {
    /// Whether one record satisfies both predicates.
    ///
    /// The magnitude bound is inclusive (`magnitude >= min_magnitude`).
    /// A record without a magnitude never passes the bound; a record
    /// without a timestamp matches only [`YearFilter::All`].
    pub fn matches(&self, record: &EventRecord) -> bool {
        let year_ok = match self.year {
            YearFilter::All => true,
            YearFilter::Year(wanted) => record.year() == Some(wanted),
        };
        let magnitude_ok = record
            .magnitude
            .map(|m| m >= self.min_magnitude)
            .unwrap_or(false);
        year_ok && magnitude_ok
    }

    /// Return the matching subset, in input order.
    pub fn apply(&self, records: &[EventRecord]) -> Vec<EventRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

// ── Year discovery ────────────────────────────────────────────────────────────

/// Sorted distinct years present in the record set.
///
/// Feeds the consumer's year selector; records without a timestamp
/// contribute nothing.
pub fn available_years(records: &[EventRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().filter_map(|r| r.year()).collect();
    years.into_iter().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
