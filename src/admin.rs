//! Admin forms: passkey gate, word rows, bulk text and sentence submission
//!
//! The gate is a shared string compared locally. It keeps casual visitors out
//! of the forms and nothing more.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::{NewWords, WordMap, WordService};
use crate::dates::format_date;
use crate::error::{Error, Result};

pub const PASSKEY_ERROR: &str = "Incorrect passkey, only admins can add words";

#[derive(Debug, Default)]
pub struct AdminGate {
    expected: Option<String>,
    unlocked: bool,
    error: Option<String>,
}

impl AdminGate {
    /// `expected` of `None` means no passkey is configured and the gate stays shut
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected,
            unlocked: false,
            error: None,
        }
    }

    pub fn submit(&mut self, attempt: &str) -> bool {
        self.unlocked = self.expected.as_deref() == Some(attempt);
        if self.unlocked {
            self.error = None;
            info!("Admin forms unlocked");
        } else {
            self.error = Some(PASSKEY_ERROR.to_string());
            warn!("Rejected admin passkey");
        }
        self.unlocked
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn require(&self) -> Result<()> {
        if self.unlocked {
            Ok(())
        } else {
            Err(Error::Validation(PASSKEY_ERROR.to_string()))
        }
    }
}

/// One row of the add-words form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInput {
    pub word: String,
    /// Comma separated
    pub synonyms: String,
}

impl WordInput {
    pub fn new(word: impl Into<String>, synonyms: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            synonyms: synonyms.into(),
        }
    }
}

fn split_synonyms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn form rows into the word map sent to the backend.
///
/// Rows without a word are skipped; a word without synonyms is rejected.
pub fn build_word_map(rows: &[WordInput]) -> Result<WordMap> {
    let mut words = WordMap::new();
    for row in rows {
        let word = row.word.trim();
        if word.is_empty() {
            continue;
        }
        let synonyms = split_synonyms(&row.synonyms);
        if synonyms.is_empty() {
            return Err(Error::Validation(format!("'{}' needs at least one synonym", word)));
        }
        words.insert(word.to_string(), synonyms);
    }
    if words.is_empty() {
        return Err(Error::Validation("Please enter at least one word".to_string()));
    }
    Ok(words)
}

/// Parse bulk text, one `Word: synonym1, synonym2` per line
pub fn parse_bulk(text: &str) -> Result<Vec<WordInput>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let (word, synonyms) = line.split_once(':').ok_or_else(|| {
                Error::Validation(format!(
                    "Line {}: expected 'Word: synonym1, synonym2'",
                    i + 1
                ))
            })?;
            Ok(WordInput::new(word.trim(), synonyms.trim()))
        })
        .collect()
}

/// Add-words and add-sentence forms behind the gate
#[derive(Debug, Default)]
pub struct AdminForms {
    pub gate: AdminGate,
    pub selected_date: Option<NaiveDate>,
    pub rows: Vec<WordInput>,
    pub sentence: String,
}

impl AdminForms {
    pub fn new(gate: AdminGate) -> Self {
        Self {
            gate,
            selected_date: None,
            rows: vec![WordInput::default()],
            sentence: String::new(),
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(WordInput::default());
    }

    fn payload(&self, rows: &[WordInput]) -> Result<NewWords> {
        self.gate.require()?;
        let date = self
            .selected_date
            .ok_or_else(|| Error::Validation("Please select a date".to_string()))?;
        Ok(NewWords {
            date: format_date(date),
            words: build_word_map(rows)?,
        })
    }

    /// Submit the form rows
    pub async fn submit_words(&self, service: &dyn WordService) -> Result<usize> {
        self.submit(service, &self.rows).await
    }

    /// Submit bulk text, either typed in or read from a file
    pub async fn submit_bulk(&self, service: &dyn WordService, text: &str) -> Result<usize> {
        let rows = parse_bulk(text)?;
        self.submit(service, &rows).await
    }

    /// Submit rows from any source, e.g. an imported spreadsheet
    pub async fn submit(&self, service: &dyn WordService, rows: &[WordInput]) -> Result<usize> {
        let payload = self.payload(rows)?;
        let count = payload.words.len();
        service.add_words(&payload).await.map_err(|e| {
            warn!("Failed to add words: {}", e);
            e
        })?;
        info!("Added {} words for {}", count, payload.date);
        Ok(count)
    }

    /// Submit the sentence field; it is cleared on success.
    pub async fn submit_sentence(&mut self, service: &dyn WordService) -> Result<()> {
        self.gate.require()?;
        let sentence = self.sentence.trim();
        if sentence.is_empty() {
            return Err(Error::Validation("Please enter a sentence".to_string()));
        }
        service.add_sentence(sentence).await.map_err(|e| {
            warn!("Failed to add sentence: {}", e);
            e
        })?;
        self.sentence.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
