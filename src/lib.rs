//! Wordwell: spaced repetition scheduling, quizzes and study tracking for
//! a personal vocabulary bank.
//!
//! The library never touches the disk on its own except through
//! [`storage::FileStorage`]; every engine works on snapshots handed in by the
//! caller and returns the mutations to persist.

pub mod activity;
pub mod clock;
pub mod config;
pub mod quiz;
pub mod review;
pub mod storage;
pub mod vocab;
