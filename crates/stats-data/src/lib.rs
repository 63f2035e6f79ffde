//! Data layer for search-stats.
//!
//! Reads search-performance CSV exports, aggregates them in one pass and
//! runs the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use stats_core as core;
