//! Top-N ranking by magnitude.

use quake_core::models::EventRecord;

/// Return the `n` highest-magnitude records, descending.
///
/// The sort is stable: records with equal magnitude keep their input order.
/// Records without a magnitude are not rankable and are skipped. The input
/// is never mutated; when fewer than `n` rankable records exist, all of
/// them are returned.
pub fn top_by_magnitude(records: &[EventRecord], n: usize) -> Vec<EventRecord> {
    let mut ranked: Vec<EventRecord> = records
        .iter()
        .filter(|r| r.magnitude.is_some())
        .cloned()
        .collect();

    // Normalization guarantees magnitudes are finite, so the descending
    // comparison below is total over the retained records.
    ranked.sort_by(|a, b| {
        b.magnitude
            .partial_cmp(&a.magnitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
