//! Shared types for the attendance workspace.
//!
//! Holds the record model, the period and classification tables that drive
//! the parsing engine, the error type, CLI settings and text formatting.

pub mod classification;
pub mod error;
pub mod formatting;
pub mod models;
pub mod period;
pub mod profile;
pub mod settings;

pub use error::{AttendanceError, Result};
