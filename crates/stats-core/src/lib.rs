//! Shared domain layer for search-stats.
//!
//! Holds the record and summary models, the error type, field-cleaning
//! helpers, number formatting and the command-line settings.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
