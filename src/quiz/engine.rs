//! Quiz question generation and scoring

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::models::*;
use crate::activity::{ActivityKind, ActivityLog};
use crate::clock::Calendar;
use crate::vocab::{CategoryFilter, VocabularyItem};

/// A quiz over a snapshot of the vocabulary pool
///
/// `R` is the random source for targets, distractors and option order;
/// seed it for reproducible quizzes.
#[derive(Debug)]
pub struct QuizSession<R = StdRng> {
    rng: R,
    calendar: Calendar,
    question_limit: u32,
    pool: Vec<VocabularyItem>,
    state: QuizState,
    current: Option<QuizQuestion>,
    score: u32,
    questions_asked: u32,
    incorrect_attempts: Vec<IncorrectAttempt>,
}

impl QuizSession<StdRng> {
    /// Session seeded from system entropy
    pub fn new(calendar: Calendar) -> Self {
        Self::with_rng(StdRng::from_entropy(), calendar)
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(rng: R, calendar: Calendar) -> Self {
        Self {
            rng,
            calendar,
            question_limit: DEFAULT_QUESTION_LIMIT,
            pool: Vec::new(),
            state: QuizState::Idle,
            current: None,
            score: 0,
            questions_asked: 0,
            incorrect_attempts: Vec::new(),
        }
    }

    /// Builder method to change the number of questions per quiz (minimum 1)
    pub fn with_question_limit(mut self, limit: u32) -> Self {
        self.question_limit = limit.max(1);
        self
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn question_limit(&self) -> u32 {
        self.question_limit
    }

    pub fn incorrect_attempts(&self) -> &[IncorrectAttempt] {
        &self.incorrect_attempts
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Begin a quiz over the items in `category`
    ///
    /// The score, question count and incorrect-attempt log are reset either
    /// way. Needs at least [`MIN_POOL_SIZE`] items; otherwise the session goes
    /// back to `Idle` and `false` is returned. On success the first question
    /// is ready.
    pub fn start(&mut self, pool: &[VocabularyItem], category: &CategoryFilter) -> bool {
        let filtered: Vec<VocabularyItem> = pool
            .iter()
            .filter(|item| category.matches(item))
            .cloned()
            .collect();

        if filtered.len() < MIN_POOL_SIZE {
            log::info!(
                "Not enough words in {} for a quiz: {} of {} needed",
                category,
                filtered.len(),
                MIN_POOL_SIZE
            );
            self.pool.clear();
            self.current = None;
            self.score = 0;
            self.questions_asked = 0;
            self.incorrect_attempts.clear();
            self.state = QuizState::Idle;
            return false;
        }

        self.pool = filtered;
        self.score = 0;
        self.questions_asked = 0;
        self.incorrect_attempts.clear();
        self.state = QuizState::InProgress;
        log::info!("Quiz started over {} words in {}", self.pool.len(), category);

        self.next_question();
        true
    }

    /// Draw a new question from the pool
    ///
    /// The target is picked uniformly; three distractors are sampled from the
    /// remaining items without replacement. Returns `None` unless a quiz is
    /// in progress.
    pub fn next_question(&mut self) -> Option<&QuizQuestion> {
        if self.state != QuizState::InProgress || self.pool.len() < MIN_POOL_SIZE {
            return None;
        }

        let target = self.rng.gen_range(0..self.pool.len());
        let others: Vec<usize> = (0..self.pool.len()).filter(|&i| i != target).collect();

        let mut order: Vec<usize> = others
            .choose_multiple(&mut self.rng, OPTION_COUNT - 1)
            .copied()
            .collect();
        order.push(target);
        order.shuffle(&mut self.rng);

        let correct_index = order.iter().position(|&i| i == target)?;
        let options = order
            .iter()
            .map(|&i| QuizOption {
                item_id: self.pool[i].id,
                text: self.pool[i].definition.clone(),
            })
            .collect();

        let item = &self.pool[target];
        self.current = Some(QuizQuestion {
            item_id: item.id,
            word: item.word.clone(),
            definition: item.definition.clone(),
            options,
            correct_index,
        });
        self.questions_asked += 1;

        self.current.as_ref()
    }

    /// Answer the current question with the option at `index`
    ///
    /// Logs a `Quiz` event, then either draws the next question or completes
    /// the quiz once the question limit is reached. Answers outside a running
    /// quiz or outside the options are refused with `None`.
    pub fn submit_answer(
        &mut self,
        index: usize,
        at: DateTime<Utc>,
        activity: &mut ActivityLog,
    ) -> Option<AnswerOutcome> {
        if self.state != QuizState::InProgress {
            return None;
        }

        let question = self.current.as_ref()?;
        let Some(chosen) = question.options.get(index) else {
            log::warn!(
                "Answer index {} out of range for {} options",
                index,
                question.options.len()
            );
            return None;
        };

        let correct_index = question.correct_index;
        let correct = question.is_correct(index);
        if correct {
            self.score += 1;
        } else {
            self.incorrect_attempts.push(IncorrectAttempt {
                word: question.word.clone(),
                definition: question.definition.clone(),
                chosen_answer: chosen.text.clone(),
            });
        }

        activity.record_event(ActivityKind::Quiz, at, &self.calendar);

        let finished = self.questions_asked >= self.question_limit;
        if finished {
            self.state = QuizState::Complete;
            self.current = None;
            log::info!(
                "Quiz complete: {}/{} correct",
                self.score,
                self.questions_asked
            );
        } else {
            self.next_question();
        }

        Some(AnswerOutcome {
            correct,
            correct_index,
            finished,
        })
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            state: self.state,
            score: self.score,
            questions_asked: self.questions_asked,
            incorrect_attempts: self.incorrect_attempts.clone(),
        }
    }
}
