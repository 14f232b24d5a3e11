//! In-memory word service used by unit tests

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::client::{NewWords, WordMap, WordService};
use crate::error::{Error, Result};
use crate::vocab::{VocabularySet, WordEntry};

pub fn entry(word: &str, synonyms: &[&str]) -> WordEntry {
    WordEntry::new(word, synonyms.iter().map(|s| s.to_string()).collect()).unwrap()
}

pub fn sample_vocab() -> VocabularySet {
    VocabularySet::new(vec![
        entry("benevolent", &["kind", "generous"]),
        entry("austere", &["strict", "severe"]),
        entry("candid", &["honest", "frank"]),
        entry("diligent", &["hardworking", "industrious"]),
    ])
}

pub fn server_error(path: &str) -> Error {
    Error::HttpStatus { path: path.to_string(), status: 500 }
}

#[derive(Default)]
pub struct FakeWordService {
    pub all: Mutex<Option<VocabularySet>>,
    pub by_date: Mutex<HashMap<NaiveDate, WordMap>>,
    pub by_month: Mutex<HashMap<u32, VocabularySet>>,
    pub sentences: Mutex<HashMap<String, Vec<String>>>,
    pub submitted_words: Mutex<Vec<NewWords>>,
    pub submitted_sentences: Mutex<Vec<String>>,
    /// Every request fails with a 500 while set
    pub failing: Mutex<bool>,
}

impl FakeWordService {
    pub fn with_words(vocab: VocabularySet) -> Self {
        let service = Self::default();
        *service.all.lock().unwrap() = Some(vocab);
        service
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn check(&self, path: &str) -> Result<()> {
        if *self.failing.lock().unwrap() {
            Err(server_error(path))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WordService for FakeWordService {
    async fn all_words(&self) -> Result<VocabularySet> {
        self.check("/words/all")?;
        Ok(self.all.lock().unwrap().clone().unwrap_or_default())
    }

    async fn find_word(&self, word: &str) -> Result<Option<WordEntry>> {
        self.check("/words")?;
        Ok(self
            .all
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|v| v.find_word(word).cloned()))
    }

    async fn sentences(&self, word: &str) -> Result<Vec<String>> {
        self.check("/sentence")?;
        Ok(self.sentences.lock().unwrap().get(word).cloned().unwrap_or_default())
    }

    async fn words_by_date(&self, date: NaiveDate) -> Result<WordMap> {
        self.check("/words/date")?;
        Ok(self.by_date.lock().unwrap().get(&date).cloned().unwrap_or_default())
    }

    async fn words_by_month(&self, month: u32) -> Result<VocabularySet> {
        self.check("/words/month")?;
        Ok(self.by_month.lock().unwrap().get(&month).cloned().unwrap_or_default())
    }

    async fn add_words(&self, words: &NewWords) -> Result<()> {
        self.check("/words")?;
        self.submitted_words.lock().unwrap().push(words.clone());
        Ok(())
    }

    async fn add_sentence(&self, sentence: &str) -> Result<()> {
        self.check("/sentence")?;
        self.submitted_sentences.lock().unwrap().push(sentence.to_string());
        Ok(())
    }
}
