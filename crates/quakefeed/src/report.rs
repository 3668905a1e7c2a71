//! Plain-text and JSON rendering of an aggregation snapshot.
//!
//! This is a thin consumer of the snapshot, not a charting layer: aligned
//! text tables on stdout, or the snapshot serialized as pretty JSON.

use std::fmt::Write as _;

use quake_core::models::AggregationSnapshot;
use quake_core::Result;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How many country rows the text report shows.
const COUNTRY_ROWS: usize = 10;

// ── Public API ────────────────────────────────────────────────────────────────

/// Serialize the snapshot as pretty-printed JSON.
pub fn render_json(snapshot: &AggregationSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Render the snapshot as aligned text tables.
pub fn render_text(snapshot: &AggregationSnapshot) -> String {
    let mut out = String::new();

    let meta = &snapshot.metadata;
    let _ = writeln!(
        out,
        "Records: {} total ({} with magnitude, {} with timestamp, {} with coordinates)",
        meta.records_total,
        meta.records_with_magnitude,
        meta.records_with_timestamp,
        meta.records_with_coordinates,
    );

    render_bands(&mut out, snapshot);
    render_top_events(&mut out, snapshot);
    render_years(&mut out, snapshot);
    render_countries(&mut out, snapshot);

    out
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn render_bands(out: &mut String, snapshot: &AggregationSnapshot) {
    let _ = writeln!(out, "\nMagnitude bands");
    let width = snapshot
        .band_labels
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0);
    for (label, count) in snapshot.band_labels.iter().zip(&snapshot.band_counts) {
        let _ = writeln!(out, "  {:<width$}  {:>8}", label, count, width = width);
    }
    let _ = writeln!(out, "  {:<width$}  {:>8}", "total", snapshot.banded_total(), width = width);
}

fn render_top_events(out: &mut String, snapshot: &AggregationSnapshot) {
    if snapshot.top_events.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nTop {} events by magnitude", snapshot.top_events.len());
    for (i, event) in snapshot.top_events.iter().enumerate() {
        let magnitude = event
            .magnitude
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| "-".to_string());
        let when = event
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        let _ = writeln!(
            out,
            "  {:>3}. M{:<5} {}  {}",
            i + 1,
            magnitude,
            when,
            event.place,
        );
    }
}

fn render_years(out: &mut String, snapshot: &AggregationSnapshot) {
    if snapshot.year_month_matrix.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nEvents per year and month");
    let mut header = format!("  {:<6}", "year");
    for name in MONTH_NAMES {
        let _ = write!(header, "{:>5}", name);
    }
    let _ = write!(header, "{:>7}", "total");
    let _ = writeln!(out, "{}", header);

    for (year, months) in &snapshot.year_month_matrix {
        let mut row = format!("  {:<6}", year);
        for count in months {
            let _ = write!(row, "{:>5}", count);
        }
        let _ = write!(row, "{:>7}", months.iter().sum::<u64>());
        let _ = writeln!(out, "{}", row);
    }
}

fn render_countries(out: &mut String, snapshot: &AggregationSnapshot) {
    if snapshot.country_counts.is_empty() {
        return;
    }

    // Highest counts first; ties in key order since BTreeMap iteration is
    // sorted and the sort below is stable.
    let mut rows: Vec<(&String, &u64)> = snapshot.country_counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1));
    rows.truncate(COUNTRY_ROWS);

    let _ = writeln!(out, "\nTop regions");
    for (key, count) in rows {
        let label = if key.is_empty() { "(unknown)" } else { key };
        let _ = writeln!(out, "  {:<30}  {:>8}", label, count);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
