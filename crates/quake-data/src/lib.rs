//! Feed ingestion and aggregation layer for quakefeed.
//!
//! Responsible for normalizing the raw GeoJSON feed into typed
//! [`EventRecord`](quake_core::models::EventRecord)s, bucketing and counting
//! them, ranking by magnitude, filtering by year/threshold, and composing
//! everything into one immutable snapshot per run.

pub mod aggregator;
pub mod analysis;
pub mod feed;
pub mod filter;
pub mod ranker;

pub use quake_core as core;
