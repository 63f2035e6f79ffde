//! Report layer for search-stats.
//!
//! Turns an [`stats_data::analysis::AnalysisResult`] into the plain-text
//! report printed by default, or into JSON.

pub mod json_view;
pub mod text_view;

#[cfg(test)]
mod test_support;

pub use stats_core as core;
