use clap::Parser;

use crate::buckets::BandScheme;
use crate::error::{QuakeError, Result};

/// The USGS FDSN event query the original consumers fetch: conterminous
/// U.S., magnitude >= 4.5, 1975 through early 2025.
pub const DEFAULT_FEED_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query.geojson?starttime=1975-01-01%2000:00:00&endtime=2025-01-10%2023:59:59&maxlatitude=50&minlatitude=24.6&maxlongitude=-65&minlongitude=-125&minmagnitude=4.5&orderby=time";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Earthquake feed aggregation and reporting
#[derive(Parser, Debug, Clone)]
#[command(
    name = "quakefeed",
    about = "Fetch an earthquake GeoJSON feed and report aggregated views",
    version
)]
pub struct Settings {
    /// Feed URL to fetch
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub url: String,

    /// Read the feed from a local GeoJSON file instead of fetching
    #[arg(long)]
    pub input: Option<std::path::PathBuf>,

    /// Year filter: "all" or a 4-digit year
    #[arg(long, default_value = "all")]
    pub year: String,

    /// Inclusive minimum magnitude
    #[arg(long, default_value = "0")]
    pub min_magnitude: f64,

    /// Comma-separated ascending magnitude band boundaries
    #[arg(long, default_value = "5,6,7")]
    pub bands: String,

    /// Number of top-magnitude events to report
    #[arg(long, default_value = "20")]
    pub top_n: usize,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

impl Settings {
    /// Parse the `--bands` flag into a [`BandScheme`].
    pub fn band_scheme(&self) -> Result<BandScheme> {
        BandScheme::new(parse_boundaries(&self.bands)?)
    }
}

/// Parse a comma-separated boundary list, e.g. `"4.5,5,6,7"`.
pub fn parse_boundaries(spec: &str) -> Result<Vec<f64>> {
    spec.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| QuakeError::InvalidBands(format!("not a number: {:?}", token)))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boundaries_basic() {
        assert_eq!(parse_boundaries("5,6,7").unwrap(), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_parse_boundaries_whitespace_and_fractions() {
        assert_eq!(
            parse_boundaries(" 4.5, 5 ,6,7 ").unwrap(),
            vec![4.5, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn test_parse_boundaries_empty_spec() {
        assert!(parse_boundaries("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_boundaries_rejects_garbage() {
        assert!(parse_boundaries("5,six,7").is_err());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::parse_from(["quakefeed"]);
        assert_eq!(settings.year, "all");
        assert_eq!(settings.top_n, 20);
        assert_eq!(settings.format, "text");
        assert_eq!(settings.min_magnitude, 0.0);
        assert!(settings.input.is_none());
        assert_eq!(settings.url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_settings_band_scheme() {
        let settings = Settings::parse_from(["quakefeed", "--bands", "4.5,5,6,7"]);
        let scheme = settings.band_scheme().unwrap();
        assert_eq!(scheme.band_count(), 5);
    }

    #[test]
    fn test_settings_band_scheme_rejects_descending() {
        let settings = Settings::parse_from(["quakefeed", "--bands", "7,5"]);
        assert!(settings.band_scheme().is_err());
    }
}
