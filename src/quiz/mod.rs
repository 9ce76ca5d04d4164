//! Multiple-choice vocabulary quizzes
//!
//! Each question shows a word and four definitions: the right one and three
//! distractors drawn from other items in the same pool.

pub mod engine;
pub mod models;

pub use engine::QuizSession;
pub use models::*;
