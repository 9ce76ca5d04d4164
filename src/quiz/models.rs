//! Data models for quizzes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Options shown per question
pub const OPTION_COUNT: usize = 4;

/// Smallest pool that can fill a question with three distractors
pub const MIN_POOL_SIZE: usize = OPTION_COUNT;

/// Questions per quiz unless configured otherwise
pub const DEFAULT_QUESTION_LIMIT: u32 = 10;

/// Lifecycle of a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizState {
    /// Not started, or the last start had too few items
    #[default]
    Idle,
    InProgress,
    Complete,
}

/// One answer choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    /// Item whose definition this is
    pub item_id: Uuid,
    pub text: String,
}

/// A word with four candidate definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub item_id: Uuid,
    pub word: String,
    pub definition: String,
    pub options: Vec<QuizOption>,
    /// Position of the target item's option. Fixed when the options are
    /// shuffled, so identical definitions on different items cannot confuse it.
    pub correct_index: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    pub fn option_texts(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.text.as_str()).collect()
    }
}

/// A missed question, kept for the end-of-quiz review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncorrectAttempt {
    pub word: String,
    pub definition: String,
    pub chosen_answer: String,
}

/// Result of answering one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_index: usize,
    /// The quiz reached its question limit with this answer
    pub finished: bool,
}

/// Score card for a quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub state: QuizState,
    pub score: u32,
    pub questions_asked: u32,
    pub incorrect_attempts: Vec<IncorrectAttempt>,
}

impl QuizSummary {
    /// Correct answers as a share of answered questions, 0.0 - 100.0
    pub fn percentage(&self) -> f64 {
        let answered = self.score as usize + self.incorrect_attempts.len();
        if answered == 0 {
            0.0
        } else {
            self.score as f64 / answered as f64 * 100.0
        }
    }
}
