use quake_core::{QuakeError, Result};
use tracing::{debug, info};

// ── Feed retrieval ─────────────────────────────────────────────────────────────

/// Fetch the feed document with a single GET.
///
/// The fetch either succeeds with the full body or fails as a unit; there
/// is no retry policy and no streaming.
pub async fn fetch_feed(url: &str) -> Result<String> {
    info!("Fetching feed from {}", url);

    let response = reqwest::get(url)
        .await
        .map_err(|e| QuakeError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(QuakeError::Fetch(format!("HTTP {}", status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| QuakeError::Fetch(e.to_string()))?;

    debug!("Fetched {} bytes", body.len());
    Ok(body)
}
