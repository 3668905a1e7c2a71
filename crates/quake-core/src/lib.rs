//! Domain types and pure helpers for the quakefeed aggregation pipeline.
//!
//! Holds the typed event record, the configurable magnitude/depth band
//! schemes, the snapshot types produced by the aggregation facade, the
//! shared error type, and the CLI settings surface.

pub mod buckets;
pub mod error;
pub mod models;
pub mod settings;

pub use error::{QuakeError, Result};
