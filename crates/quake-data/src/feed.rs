//! GeoJSON feed normalization.
//!
//! Turns the raw USGS-style payload (`features[]` with
//! `geometry.coordinates = [lon, lat, depth?]` and
//! `properties = {mag, place, time}`) into typed [`EventRecord`]s. Field
//! extraction is defensive: a malformed field becomes `None` on the record,
//! never an error, and only a feature with no usable field at all is
//! dropped.

use std::path::Path;

use chrono::{DateTime, Utc};
use quake_core::models::{Coordinates, EventRecord};
use quake_core::{QuakeError, Result};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a full feed document into event records.
///
/// Fails only when the document itself is not JSON or has no `features`
/// array; individual malformed features are skipped (with a debug log) and
/// partially valid ones are retained.
pub fn parse_feed(document: &str) -> Result<Vec<EventRecord>> {
    let payload: serde_json::Value = serde_json::from_str(document)?;

    let features = payload
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| QuakeError::InvalidPayload("missing \"features\" array".to_string()))?;

    let mut records: Vec<EventRecord> = Vec::with_capacity(features.len());
    let mut dropped = 0usize;

    for feature in features {
        match normalize_feature(feature) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("Dropped {} features with no usable fields", dropped);
    }
    debug!(
        "Normalized {} of {} feed features",
        records.len(),
        features.len()
    );

    Ok(records)
}

/// Read and parse a feed document from a local file.
pub fn load_feed_file(path: &Path) -> Result<Vec<EventRecord>> {
    let document = std::fs::read_to_string(path).map_err(|source| QuakeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feed(&document)
}

/// Normalize one feed feature into an [`EventRecord`].
///
/// Returns `None` only when none of magnitude, timestamp, or coordinates
/// could be extracted; otherwise the missing pieces stay `None` on the
/// record and downstream aggregates skip them as needed.
pub fn normalize_feature(feature: &serde_json::Value) -> Option<EventRecord> {
    let props = feature.get("properties");

    let magnitude = props
        .and_then(|p| p.get("mag"))
        .and_then(|v| v.as_f64())
        .filter(|m| m.is_finite());

    let place = props
        .and_then(|p| p.get("place"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let timestamp = props.and_then(|p| p.get("time")).and_then(parse_time);

    let coordinates = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(parse_coordinates);

    if magnitude.is_none() && timestamp.is_none() && coordinates.is_none() {
        return None;
    }

    Some(EventRecord {
        magnitude,
        place,
        timestamp,
        coordinates,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse the feed's `time` property into a UTC timestamp.
///
/// The feed ships epoch milliseconds as a JSON number; RFC 3339 strings
/// (including the `Z` suffix) are accepted as a fallback.
fn parse_time(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        serde_json::Value::String(s) => {
            if s.is_empty() {
                return None;
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

/// Parse a `[lon, lat, depth?]` coordinate array.
///
/// Requires at least two finite numbers; a third element, when present and
/// finite, is the depth in kilometres.
fn parse_coordinates(value: &serde_json::Value) -> Option<Coordinates> {
    let array = value.as_array()?;
    let longitude = array.first().and_then(|v| v.as_f64()).filter(|v| v.is_finite())?;
    let latitude = array.get(1).and_then(|v| v.as_f64()).filter(|v| v.is_finite())?;
    let depth_km = array.get(2).and_then(|v| v.as_f64()).filter(|v| v.is_finite());

    Some(Coordinates {
        longitude,
        latitude,
        depth_km,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn feature(mag: serde_json::Value, place: &str, time: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "geometry": {"coordinates": [-122.4, 37.8, 8.2]},
            "properties": {"mag": mag, "place": place, "time": time},
        })
    }

    // ── normalize_feature ─────────────────────────────────────────────────────

    #[test]
    fn test_normalize_complete_feature() {
        let value = feature(
            serde_json::json!(5.3),
            "10 km W of Petrolia, CA",
            serde_json::json!(1_584_266_400_000i64),
        );
        let record = normalize_feature(&value).unwrap();
        assert_eq!(record.magnitude, Some(5.3));
        assert_eq!(record.place, "10 km W of Petrolia, CA");
        assert_eq!(record.year(), Some(2020));
        let coords = record.coordinates.unwrap();
        assert_eq!(coords.longitude, -122.4);
        assert_eq!(coords.latitude, 37.8);
        assert_eq!(coords.depth_km, Some(8.2));
    }

    #[test]
    fn test_normalize_missing_magnitude_retained() {
        let value = feature(
            serde_json::Value::Null,
            "offshore",
            serde_json::json!(1_584_266_400_000i64),
        );
        let record = normalize_feature(&value).unwrap();
        assert_eq!(record.magnitude, None);
        assert!(record.timestamp.is_some());
    }

    #[test]
    fn test_normalize_non_numeric_magnitude_retained() {
        let value = feature(
            serde_json::json!("big"),
            "offshore",
            serde_json::json!(1_584_266_400_000i64),
        );
        let record = normalize_feature(&value).unwrap();
        assert_eq!(record.magnitude, None);
    }

    #[test]
    fn test_normalize_short_coordinate_array() {
        let value = serde_json::json!({
            "geometry": {"coordinates": [-122.4]},
            "properties": {"mag": 5.0, "place": "x", "time": 0},
        });
        let record = normalize_feature(&value).unwrap();
        assert!(record.coordinates.is_none());
        assert_eq!(record.magnitude, Some(5.0));
    }

    #[test]
    fn test_normalize_two_element_coordinates() {
        let value = serde_json::json!({
            "geometry": {"coordinates": [-122.4, 37.8]},
            "properties": {"mag": 5.0, "place": "x", "time": 0},
        });
        let coords = normalize_feature(&value).unwrap().coordinates.unwrap();
        assert_eq!(coords.depth_km, None);
    }

    #[test]
    fn test_normalize_rfc3339_time_string() {
        let value = feature(
            serde_json::json!(4.8),
            "x",
            serde_json::json!("2021-01-02T03:04:05Z"),
        );
        let record = normalize_feature(&value).unwrap();
        assert_eq!(record.year(), Some(2021));
        assert_eq!(record.month0(), Some(0));
    }

    #[test]
    fn test_normalize_unparsable_time_retained() {
        let value = feature(serde_json::json!(4.8), "x", serde_json::json!("yesterday"));
        let record = normalize_feature(&value).unwrap();
        assert!(record.timestamp.is_none());
        assert_eq!(record.magnitude, Some(4.8));
    }

    #[test]
    fn test_normalize_rejects_feature_with_nothing_usable() {
        let value = serde_json::json!({
            "geometry": {"coordinates": "not-an-array"},
            "properties": {"mag": null, "place": "somewhere", "time": null},
        });
        assert!(normalize_feature(&value).is_none());
    }

    #[test]
    fn test_normalize_missing_place_defaults_empty() {
        let value = serde_json::json!({
            "geometry": {"coordinates": [1.0, 2.0, 3.0]},
            "properties": {"mag": 5.0, "time": 0},
        });
        let record = normalize_feature(&value).unwrap();
        assert_eq!(record.place, "");
    }

    // ── parse_feed ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_feed_basic() {
        let document = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                feature(serde_json::json!(5.0), "a, CA", serde_json::json!(0)),
                feature(serde_json::json!(6.1), "b, NV", serde_json::json!(1_000)),
            ],
        })
        .to_string();

        let records = parse_feed(&document).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].magnitude, Some(5.0));
        assert_eq!(records[1].magnitude, Some(6.1));
    }

    #[test]
    fn test_parse_feed_empty_features() {
        let records = parse_feed(r#"{"features": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_feed_missing_features_array() {
        let err = parse_feed(r#"{"type": "FeatureCollection"}"#).unwrap_err();
        assert!(err.to_string().contains("features"));
    }

    #[test]
    fn test_parse_feed_invalid_json() {
        assert!(parse_feed("{not json").is_err());
    }

    #[test]
    fn test_parse_feed_skips_unusable_features() {
        let document = serde_json::json!({
            "features": [
                feature(serde_json::json!(5.0), "a, CA", serde_json::json!(0)),
                {"properties": {"place": "label only"}},
            ],
        })
        .to_string();

        let records = parse_feed(&document).unwrap();
        assert_eq!(records.len(), 1);
    }

    // ── load_feed_file ────────────────────────────────────────────────────────

    #[test]
    fn test_load_feed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.geojson");
        let document = serde_json::json!({
            "features": [feature(serde_json::json!(5.0), "a, CA", serde_json::json!(0))],
        })
        .to_string();
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", document).unwrap();

        let records = load_feed_file(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_feed_file_missing() {
        let err = load_feed_file(Path::new("/tmp/does-not-exist-quakefeed-test.geojson"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
