//! Quiz session state machine and scoring

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::questions::{generate_question_for, min_distractors, Question, OPTION_COUNT};
use crate::vocab::VocabularySet;

/// Shown in the summary when the user submitted without picking an option
pub const NO_ANSWER: &str = "No answer selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizState {
    NotStarted,
    AwaitingAttemptCount,
    InProgress,
    Finished,
}

/// One incorrectly answered question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_text: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub all_synonyms: Vec<String>,
}

impl AnswerRecord {
    pub fn user_answer_display(&self) -> &str {
        self.user_answer.as_deref().unwrap_or(NO_ANSWER)
    }
}

/// Deferred move to the next question after a wrong answer.
///
/// Only valid for the session and index it was issued for; anything else
/// is stale and gets discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    session_id: u64,
    index: usize,
}

impl PendingAdvance {
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect {
        feedback: String,
        /// `None` when the wrong answer was the last one
        pending: Option<PendingAdvance>,
    },
}

/// End-of-quiz score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub requested: usize,
    pub correct_count: usize,
    pub incorrect: Vec<AnswerRecord>,
    pub accuracy_percent: f64,
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.incorrect.is_empty() {
            write!(
                f,
                "You attempted {} questions and answered all of them correctly.",
                self.requested
            )
        } else {
            write!(
                f,
                "You attempted {} questions and answered {} correctly.",
                self.requested, self.correct_count
            )
        }
    }
}

/// A single run of the quiz, from the attempt count prompt to the summary.
///
/// Questions are generated one at a time, right before they are shown.
#[derive(Debug)]
pub struct QuizSession {
    state: QuizState,
    vocab: Arc<VocabularySet>,
    /// Answer-bearing entries, one per question
    sampled: Vec<usize>,
    questions: Vec<Question>,
    current_index: usize,
    correct_count: usize,
    incorrect: Vec<AnswerRecord>,
    total_requested: usize,
    session_id: u64,
    pending: Option<PendingAdvance>,
    feedback: Option<String>,
    rng: StdRng,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl QuizSession {
    pub fn new(rng: StdRng) -> Self {
        Self {
            state: QuizState::NotStarted,
            vocab: Arc::default(),
            sampled: Vec::new(),
            questions: Vec::new(),
            current_index: 0,
            correct_count: 0,
            incorrect: Vec::new(),
            total_requested: 0,
            session_id: 0,
            pending: None,
            feedback: None,
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// The user asked for a quiz; wait for the number of questions.
    pub fn begin(&mut self) -> Result<()> {
        if self.state == QuizState::InProgress {
            return Err(Error::InvalidState("a quiz is already running".to_string()));
        }
        self.clear();
        self.state = QuizState::AwaitingAttemptCount;
        Ok(())
    }

    /// Start a quiz of `requested` questions over `vocab`.
    ///
    /// Any previous run, including a pending feedback advance, is dropped.
    /// On failure the session waits for a new attempt count.
    pub fn start(&mut self, requested: usize, vocab: Arc<VocabularySet>) -> Result<&Question> {
        self.clear();
        self.state = QuizState::AwaitingAttemptCount;

        if requested == 0 {
            return Err(Error::Validation(
                "Number of questions must be at least 1".to_string(),
            ));
        }

        let mut distinct = vocab.distinct_indices();
        if requested > distinct.len() {
            warn!(
                "Quiz needs {} words but only {} are available",
                requested,
                distinct.len()
            );
            return Err(Error::InsufficientWords {
                requested,
                available: distinct.len(),
            });
        }

        distinct.shuffle(&mut self.rng);
        distinct.truncate(requested);

        for &idx in &distinct {
            let available = min_distractors(&vocab, &vocab.entries()[idx]);
            if available < OPTION_COUNT - 1 {
                warn!(
                    "'{}' cannot get {} distinct options",
                    vocab.entries()[idx].word,
                    OPTION_COUNT
                );
                return Err(Error::InsufficientData { available });
            }
        }

        self.vocab = vocab;
        self.sampled = distinct;
        self.total_requested = requested;
        self.state = QuizState::InProgress;
        self.generate_at(0)?;

        info!("Started quiz {} with {} questions", self.session_id, requested);
        Ok(&self.questions[0])
    }

    /// Check `selected` against the current question.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Result<AnswerOutcome> {
        if self.state != QuizState::InProgress {
            return Err(Error::InvalidState(format!(
                "cannot answer while {:?}",
                self.state
            )));
        }
        if self.pending.is_some() {
            return Err(Error::InvalidState(
                "waiting for the feedback to clear".to_string(),
            ));
        }

        let question = &self.questions[self.current_index];
        if selected == Some(question.correct_answer.as_str()) {
            self.correct_count += 1;
            self.advance()?;
            return Ok(AnswerOutcome::Correct);
        }

        let (headword, synonym) = if question.is_synonym_question {
            (&question.correct_answer, &question.prompt)
        } else {
            (&question.prompt, &question.correct_answer)
        };
        let record = AnswerRecord {
            question_text: question.display_text(),
            user_answer: selected.map(str::to_string),
            correct_answer: question.correct_answer.clone(),
            all_synonyms: self.vocab.synonyms_for(headword, synonym),
        };
        let feedback = format!("Wrong! Correct answer: {}", record.correct_answer);
        debug!("Incorrect answer for question {}", self.current_index);
        self.incorrect.push(record);

        if self.current_index + 1 >= self.total_requested {
            self.finish();
            return Ok(AnswerOutcome::Incorrect {
                feedback,
                pending: None,
            });
        }

        let pending = PendingAdvance {
            session_id: self.session_id,
            index: self.current_index,
        };
        self.pending = Some(pending);
        self.feedback = Some(feedback.clone());
        Ok(AnswerOutcome::Incorrect {
            feedback,
            pending: Some(pending),
        })
    }

    /// Apply a deferred advance. Returns false for a stale token.
    pub fn apply_advance(&mut self, token: PendingAdvance) -> Result<bool> {
        if self.pending != Some(token) {
            debug!(
                "Discarding stale advance for session {} index {}",
                token.session_id, token.index
            );
            return Ok(false);
        }
        self.pending = None;
        self.feedback = None;
        self.advance()?;
        Ok(true)
    }

    /// Drop everything and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.clear();
        self.state = QuizState::NotStarted;
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            QuizState::InProgress => self.questions.get(self.current_index),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_requested(&self) -> usize {
        self.total_requested
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn incorrect_answers(&self) -> &[AnswerRecord] {
        &self.incorrect
    }

    /// Questions generated so far
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Feedback message while a deferred advance is pending
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        if self.state != QuizState::Finished {
            return None;
        }
        let accuracy_percent = if self.total_requested > 0 {
            (self.correct_count as f64 / self.total_requested as f64) * 100.0
        } else {
            0.0
        };
        Some(QuizSummary {
            requested: self.total_requested,
            correct_count: self.correct_count,
            incorrect: self.incorrect.clone(),
            accuracy_percent,
        })
    }

    fn advance(&mut self) -> Result<()> {
        if self.current_index + 1 >= self.total_requested {
            self.finish();
            return Ok(());
        }
        self.current_index += 1;
        self.generate_at(self.current_index)
    }

    fn generate_at(&mut self, index: usize) -> Result<()> {
        let target = &self.vocab.entries()[self.sampled[index]];
        match generate_question_for(&self.vocab, target, &mut self.rng) {
            Ok(question) => {
                self.questions.push(question);
                Ok(())
            }
            Err(e) => {
                error!("Failed to generate question {}: {}", index, e);
                self.finish();
                Err(e)
            }
        }
    }

    fn finish(&mut self) {
        self.state = QuizState::Finished;
        self.pending = None;
        self.feedback = None;
        info!(
            "Quiz {} finished: {}/{} correct",
            self.session_id, self.correct_count, self.total_requested
        );
    }

    fn clear(&mut self) {
        self.session_id += 1;
        self.vocab = Arc::default();
        self.sampled.clear();
        self.questions.clear();
        self.current_index = 0;
        self.correct_count = 0;
        self.incorrect.clear();
        self.total_requested = 0;
        self.pending = None;
        self.feedback = None;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
