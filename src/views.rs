//! View state for the browsing features
//!
//! Each struct owns the state of one part of the page and the transitions
//! triggered by its buttons. Failures are turned into user-facing messages
//! here; nothing propagates past the triggering action.

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::client::{WordMap, WordService};
use crate::dates::{format_date, validate_month};
use crate::error::{Error, Result};
use crate::fuzzy::{suggest, DEFAULT_THRESHOLD, MAX_SUGGESTIONS};
use crate::store::VocabularyStore;
use crate::vocab::{VocabularySet, WordEntry};

pub const NO_WORDS_FOUND: &str = "No words found in the database";
pub const NO_SENTENCES_FOUND: &str = "No sentences found in the database";
pub const NO_DATE_WORDS: &str = "No words found for this date";
pub const NO_MONTH_WORDS: &str = "No words found for the selected month.";

/// The "fetch all word pairs" list
#[derive(Debug, Default)]
pub struct WordListView {
    pub visible: bool,
    pub error: Option<String>,
}

impl WordListView {
    /// Fetch and show the list, or hide it when it is already showing.
    pub async fn toggle(&mut self, store: &mut VocabularyStore) {
        if self.visible {
            self.visible = false;
            return;
        }
        self.error = None;
        match store.load().await {
            Ok(_) => self.visible = true,
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchView {
    pub result: Option<WordEntry>,
    pub error: Option<String>,
    pub suggestions: Vec<String>,
    /// `None` until sentences were requested
    pub sentences: Option<Vec<String>>,
}

impl SearchView {
    /// Look `word` up; on a miss, suggest close words from `cached`.
    pub async fn search(&mut self, service: &dyn WordService, cached: &VocabularySet, word: &str) {
        self.result = None;
        self.error = None;
        self.suggestions.clear();

        match service.find_word(word.trim()).await {
            Ok(Some(entry)) => self.result = Some(entry),
            Ok(None) => self.miss(cached, word),
            Err(e) => {
                error!("Error fetching word '{}': {}", word, e);
                self.miss(cached, word);
            }
        }
    }

    fn miss(&mut self, cached: &VocabularySet, word: &str) {
        self.error = Some(NO_WORDS_FOUND.to_string());
        self.suggestions = suggest(cached, word, DEFAULT_THRESHOLD, MAX_SUGGESTIONS);
        debug!("No match for '{}', {} suggestions", word, self.suggestions.len());
    }

    pub async fn search_sentences(&mut self, service: &dyn WordService, word: &str) {
        self.sentences = None;
        match service.sentences(word.trim()).await {
            Ok(sentences) => self.sentences = Some(sentences),
            Err(e) => {
                error!("Error fetching sentences for '{}': {}", word, e);
                self.error = Some(NO_SENTENCES_FOUND.to_string());
            }
        }
    }
}

/// Words added on a given date
#[derive(Debug, Default)]
pub struct DateView {
    pub selected: Option<NaiveDate>,
    pub word_pairs: WordMap,
    pub error: Option<String>,
    pub visible: bool,
}

impl DateView {
    /// Fetch the selected date's words, or hide them when already showing.
    ///
    /// Fails without touching any state when no date is selected.
    pub async fn toggle(&mut self, service: &dyn WordService) -> Result<()> {
        if self.visible {
            self.visible = false;
            return Ok(());
        }
        let date = self
            .selected
            .ok_or_else(|| Error::Validation("Please select a date".to_string()))?;

        self.word_pairs.clear();
        self.error = None;
        match service.words_by_date(date).await {
            Ok(words) if !words.is_empty() => {
                self.word_pairs = words;
                self.visible = true;
            }
            Ok(_) => self.error = Some(NO_DATE_WORDS.to_string()),
            Err(e) => {
                error!("Error fetching words for {}: {}", format_date(date), e);
                self.error = Some(NO_DATE_WORDS.to_string());
            }
        }
        Ok(())
    }
}

/// Words added during a month
#[derive(Debug, Default)]
pub struct MonthView {
    pub selected: Option<u32>,
    pub words: VocabularySet,
    pub error: Option<String>,
}

impl MonthView {
    pub async fn select(&mut self, service: &dyn WordService, month: u32) -> Result<()> {
        let month = validate_month(month)?;
        self.selected = Some(month);
        self.words = VocabularySet::default();
        self.error = None;
        match service.words_by_month(month).await {
            Ok(words) => self.words = words,
            Err(e) => {
                error!("Error fetching words for month {}: {}", month, e);
                self.error = Some(e.to_string());
            }
        }
        Ok(())
    }

    /// Message shown under the month picker when the list is empty
    pub fn empty_message(&self) -> Option<&str> {
        if self.words.is_empty() {
            Some(self.error.as_deref().unwrap_or(NO_MONTH_WORDS))
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
