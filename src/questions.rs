//! Multiple-choice synonym question generation

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::vocab::{VocabularySet, WordEntry};

/// Number of options shown per question
pub const OPTION_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Which side of the word/synonym pair is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Prompt is a word, answer is one of its synonyms
    Word,
    /// Prompt is a synonym, answer is the word
    Synonym,
}

impl QuestionKind {
    fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            QuestionKind::Word
        } else {
            QuestionKind::Synonym
        }
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub is_synonym_question: bool,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        if self.is_synonym_question {
            QuestionKind::Synonym
        } else {
            QuestionKind::Word
        }
    }

    /// Text shown to the user and stored in the incorrect-answer summary
    pub fn display_text(&self) -> String {
        match self.kind() {
            QuestionKind::Synonym => format!("What word matches the synonym '{}'?", self.prompt),
            QuestionKind::Word => format!("What is the synonym for '{}'?", self.prompt),
        }
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_answer)
    }
}

/// Distinct distractor candidates for a question about `target`.
///
/// Other entries sharing the target's word are skipped, as are candidates
/// that would also be a right answer.
fn distractor_pool<'a>(
    vocab: &'a VocabularySet,
    target: &WordEntry,
    kind: QuestionKind,
    prompt: &str,
    correct: &str,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let others = vocab.iter().filter(|e| e.word != target.word);
    let candidates: Vec<&str> = match kind {
        QuestionKind::Word => others
            .flat_map(|e| e.synonyms.iter().map(String::as_str))
            .filter(|s| *s != correct && !target.has_synonym(s))
            .collect(),
        QuestionKind::Synonym => others
            .filter(|e| !e.has_synonym(prompt))
            .map(|e| e.word.as_str())
            .filter(|w| *w != correct)
            .collect(),
    };
    candidates.into_iter().filter(|c| seen.insert(*c)).collect()
}

/// Smallest distractor pool any question about `target` could draw from.
///
/// Checked for every prompt either orientation might pick, so a passing
/// entry can never fail generation later.
pub fn min_distractors(vocab: &VocabularySet, target: &WordEntry) -> usize {
    let word_side = target
        .synonyms
        .iter()
        .map(|syn| distractor_pool(vocab, target, QuestionKind::Word, &target.word, syn).len());
    let synonym_side = target
        .synonyms
        .iter()
        .map(|syn| distractor_pool(vocab, target, QuestionKind::Synonym, syn, &target.word).len());
    word_side.chain(synonym_side).min().unwrap_or(0)
}

/// Generate a question about a uniformly chosen entry of `vocab`.
pub fn generate_question<R: Rng>(vocab: &VocabularySet, rng: &mut R) -> Result<Question> {
    let target = vocab
        .entries()
        .choose(rng)
        .ok_or(Error::InsufficientData { available: 0 })?;
    generate_question_for(vocab, target, rng)
}

/// Generate a question whose answer comes from `target`.
///
/// Distractors are drawn from the rest of `vocab` without replacement and
/// the four options are shuffled before returning.
pub fn generate_question_for<R: Rng>(
    vocab: &VocabularySet,
    target: &WordEntry,
    rng: &mut R,
) -> Result<Question> {
    let kind = QuestionKind::random(rng);
    let synonym = target
        .synonyms
        .choose(rng)
        .ok_or(Error::InsufficientData { available: 0 })?
        .clone();

    let (prompt, correct_answer) = match kind {
        QuestionKind::Word => (target.word.clone(), synonym),
        QuestionKind::Synonym => (synonym, target.word.clone()),
    };

    let pool = distractor_pool(vocab, target, kind, &prompt, &correct_answer);
    if pool.len() < DISTRACTOR_COUNT {
        return Err(Error::InsufficientData { available: pool.len() });
    }

    let mut options: Vec<String> = pool
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|s| s.to_string())
        .collect();
    options.push(correct_answer.clone());
    options.shuffle(rng);

    debug!("Generated {:?} question for '{}'", kind, target.word);

    Ok(Question {
        prompt,
        options,
        correct_answer,
        is_synonym_question: kind == QuestionKind::Synonym,
    })
}

#[cfg(test)]
#[path = "questions_test.rs"]
mod tests;
