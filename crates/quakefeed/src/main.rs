mod bootstrap;
mod fetch;
mod report;

use anyhow::Result;
use clap::Parser;
use quake_core::models::AggregationConfig;
use quake_core::settings::Settings;
use quake_data::analysis::analyze_events;
use quake_data::feed;
use quake_data::filter::{available_years, FilterCriteria, YearFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("quakefeed v{} starting", env!("CARGO_PKG_VERSION"));

    let bands = settings.band_scheme()?;
    let year: YearFilter = settings.year.parse()?;
    let criteria = FilterCriteria {
        year,
        min_magnitude: settings.min_magnitude,
    };
    let config = AggregationConfig {
        bands,
        top_n: settings.top_n,
    };

    let records = match &settings.input {
        Some(path) => {
            tracing::info!("Reading feed from {}", path.display());
            feed::load_feed_file(path)?
        }
        None => {
            let body = fetch::fetch_feed(&settings.url).await?;
            feed::parse_feed(&body)?
        }
    };

    tracing::info!(
        "Loaded {} records spanning years {:?}",
        records.len(),
        available_years(&records),
    );

    let snapshot = analyze_events(&records, &config, &criteria);

    let rendered = match settings.format.as_str() {
        "json" => report::render_json(&snapshot)?,
        _ => report::render_text(&snapshot),
    };
    println!("{}", rendered);

    Ok(())
}
