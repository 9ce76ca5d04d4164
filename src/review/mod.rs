//! Spaced repetition review for Wordwell
//!
//! This module provides:
//! - SM-2 scheduling of a single review outcome
//! - Due-queue selection and ordering
//! - Practice sessions that walk a queue and log study activity

pub mod algorithm;
pub mod queue;
pub mod session;

pub use algorithm::{apply_review, Rating};
pub use queue::{due_items, due_items_with_buffer};
pub use session::PracticeSession;
