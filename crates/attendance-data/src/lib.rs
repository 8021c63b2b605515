//! Ingestion layer for attendance sheets.
//!
//! Turns exported sheet text into employees with daily entries, then scopes
//! and aggregates those entries into attendance statistics.

pub mod aggregator;
pub mod analysis;
pub mod builder;
pub mod filter;
pub mod header;
pub mod search;
pub mod tokenizer;

pub use attendance_core as core;
