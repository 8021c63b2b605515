//! Runtime layer for attendance reporting.
//!
//! Locates sheet text (remote spreadsheet or local file), fetches it with
//! endpoint fallback and keeps the newest ingestion result.

pub mod data_manager;
pub mod fetch;
pub mod source;

pub use attendance_core as core;
pub use attendance_data as data;
