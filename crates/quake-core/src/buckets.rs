//! Half-open band bucketing and place-string keying.
//!
//! A [`BandScheme`] assigns any finite value to exactly one band of a fixed,
//! ordered interval list. The presets correspond to the three bucketing
//! schemes the feed consumers use: the coarse magnitude histogram, the finer
//! map-legend breakpoints, and the depth categories.

use serde::{Deserialize, Serialize};

use crate::error::{QuakeError, Result};

// ── BandScheme ────────────────────────────────────────────────────────────────

/// An ordered list of ascending boundaries defining half-open bands.
///
/// Boundaries `[b0, b1, .., bk]` define `k + 1` bands:
/// `(-inf, b0)`, `[b0, b1)`, .., `[bk, +inf)`. A value exactly on a boundary
/// belongs to the higher band. An empty boundary list defines a single
/// all-encompassing band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScheme {
    boundaries: Vec<f64>,
}

impl BandScheme {
    /// Build a scheme from ascending, finite boundaries.
    pub fn new(boundaries: Vec<f64>) -> Result<Self> {
        if boundaries.iter().any(|b| !b.is_finite()) {
            return Err(QuakeError::InvalidBands(
                "boundaries must be finite".to_string(),
            ));
        }
        if boundaries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(QuakeError::InvalidBands(
                "boundaries must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { boundaries })
    }

    /// The 4-band magnitude scheme used by the histogram/pie consumers:
    /// `<5`, `5-6`, `6-7`, `>=7`.
    pub fn magnitude_coarse() -> Self {
        Self {
            boundaries: vec![5.0, 6.0, 7.0],
        }
    }

    /// The 5-band magnitude scheme used by the map legend:
    /// `<4.5`, `4.5-5`, `5-6`, `6-7`, `>=7`.
    pub fn magnitude_fine() -> Self {
        Self {
            boundaries: vec![4.5, 5.0, 6.0, 7.0],
        }
    }

    /// The 6-band depth (km) scheme used by the depth-colored map:
    /// `<10`, `10-30`, `30-50`, `50-70`, `70-90`, `>=90`.
    pub fn depth() -> Self {
        Self {
            boundaries: vec![10.0, 30.0, 50.0, 70.0, 90.0],
        }
    }

    /// The ascending boundary list.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of bands (boundary count + 1).
    pub fn band_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Index of the band containing `value`.
    ///
    /// Total over all finite values: the index counts boundaries `<= value`,
    /// so a value sitting exactly on a boundary lands in the higher band.
    pub fn band_index(&self, value: f64) -> usize {
        self.boundaries.partition_point(|b| *b <= value)
    }

    /// Human-readable label for one band, e.g. `"<5"`, `"5-6"`, `">=7"`.
    pub fn band_label(&self, index: usize) -> String {
        if self.boundaries.is_empty() {
            return "all".to_string();
        }
        if index == 0 {
            format!("<{}", fmt_bound(self.boundaries[0]))
        } else if index >= self.boundaries.len() {
            format!(">={}", fmt_bound(self.boundaries[self.boundaries.len() - 1]))
        } else {
            format!(
                "{}-{}",
                fmt_bound(self.boundaries[index - 1]),
                fmt_bound(self.boundaries[index])
            )
        }
    }

    /// Labels for every band, in band order.
    pub fn band_labels(&self) -> Vec<String> {
        (0..self.band_count()).map(|i| self.band_label(i)).collect()
    }
}

impl Default for BandScheme {
    fn default() -> Self {
        Self::magnitude_coarse()
    }
}

/// Render a boundary without a trailing `.0` for whole numbers.
fn fmt_bound(b: f64) -> String {
    if b.fract() == 0.0 {
        format!("{}", b as i64)
    } else {
        format!("{}", b)
    }
}

// ── Country keying ────────────────────────────────────────────────────────────

/// Extract the country/region key from a free-form `place` description.
///
/// The feed writes places as `"12 km NE of Ridgecrest, CA"`; the trailing
/// comma-separated token is the key. A place with no `", "` separator is the
/// degenerate single-token case and keys on the whole string.
pub fn country_key(place: &str) -> &str {
    place.rsplit(", ").next().unwrap_or(place)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
