//! Vocabulary bank for Wordwell
//!
//! This module provides:
//! - The vocabulary item record and its spaced repetition metadata
//! - Category filtering shared by practice, quizzes and listings
//! - CSV import and export

pub mod import;
pub mod models;

pub use import::{export_csv, import_csv, ImportError, ImportReport};
pub use models::*;
