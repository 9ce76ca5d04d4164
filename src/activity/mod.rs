//! Study activity and streak tracking module

pub mod models;
pub mod stats;

pub use models::*;
pub use stats::{compute_forecast, compute_streak, heatmap, longest_streak, MasteryBreakdown, StudySummary};
