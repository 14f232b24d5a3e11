//! Word service client
//!
//! The backend is a plain REST service. [`WordService`] is the seam the store
//! and the views depend on; [`HttpWordService`] talks to the real thing.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::dates::format_date;
use crate::error::{Error, Result};
use crate::vocab::{VocabularySet, WordEntry};

/// Word to synonyms mapping as used by the date endpoints
pub type WordMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub sentence: String,
}

#[derive(Debug, Serialize)]
struct DateQuery<'a> {
    date: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct DateWords {
    #[serde(default)]
    words: Option<WordMap>,
}

/// Payload of `POST /words`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWords {
    pub date: String,
    pub words: WordMap,
}

#[async_trait]
pub trait WordService: Send + Sync {
    /// `GET /words/all`
    async fn all_words(&self) -> Result<VocabularySet>;
    /// `GET /words/{word}`; `None` when the backend has no such word
    async fn find_word(&self, word: &str) -> Result<Option<WordEntry>>;
    /// `GET /sentence/{word}`
    async fn sentences(&self, word: &str) -> Result<Vec<String>>;
    /// `POST /words/date`; empty when the date has no words
    async fn words_by_date(&self, date: NaiveDate) -> Result<WordMap>;
    /// `GET /words/month/{month}`
    async fn words_by_month(&self, month: u32) -> Result<VocabularySet>;
    /// `POST /words`
    async fn add_words(&self, words: &NewWords) -> Result<()>;
    /// `POST /sentence`
    async fn add_sentence(&self, sentence: &str) -> Result<()>;
}

/// reqwest-backed [`WordService`]
#[derive(Debug, Clone)]
pub struct HttpWordService {
    client: Client,
    base_url: String,
}

impl HttpWordService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        let response = check_status(path, response)?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        debug!("POST {}", path);
        let response = self.client.post(self.url(path)).json(body).send().await?;
        check_status(path, response)
    }
}

fn check_status(path: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!("{} returned {}", path, status);
    Err(Error::HttpStatus {
        path: path.to_string(),
        status: status.as_u16(),
    })
}

/// Single-word lookups answer with `{}` or `null` when nothing matches.
fn parse_word_lookup(value: serde_json::Value) -> Result<Option<WordEntry>> {
    let has_fields = value.as_object().is_some_and(|map| !map.is_empty());
    if !has_fields {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| Error::Network(format!("Malformed word payload: {}", e)))
}

#[async_trait]
impl WordService for HttpWordService {
    async fn all_words(&self) -> Result<VocabularySet> {
        self.get_json("/words/all").await
    }

    async fn find_word(&self, word: &str) -> Result<Option<WordEntry>> {
        let path = format!("/words/{}", word);
        match self.get_json::<serde_json::Value>(&path).await {
            Ok(value) => parse_word_lookup(value),
            Err(Error::HttpStatus { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn sentences(&self, word: &str) -> Result<Vec<String>> {
        let records: Vec<SentenceRecord> = self.get_json(&format!("/sentence/{}", word)).await?;
        Ok(records.into_iter().map(|r| r.sentence).collect())
    }

    async fn words_by_date(&self, date: NaiveDate) -> Result<WordMap> {
        let formatted = format_date(date);
        let response = self
            .post_json("/words/date", &DateQuery { date: &formatted })
            .await?;
        let body: DateWords = response.json().await?;
        Ok(body.words.unwrap_or_default())
    }

    async fn words_by_month(&self, month: u32) -> Result<VocabularySet> {
        self.get_json(&format!("/words/month/{}", month)).await
    }

    async fn add_words(&self, words: &NewWords) -> Result<()> {
        self.post_json("/words", words).await?;
        Ok(())
    }

    async fn add_sentence(&self, sentence: &str) -> Result<()> {
        self.post_json("/sentence", &SentenceRecord { sentence: sentence.to_string() })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_lookup_empty_object_is_none() {
        assert_eq!(parse_word_lookup(serde_json::json!({})).unwrap(), None);
        assert_eq!(parse_word_lookup(serde_json::Value::Null).unwrap(), None);
    }

    #[test]
    fn test_word_lookup_single_entry() {
        let entry = parse_word_lookup(serde_json::json!({"candid": ["honest", "frank"]}))
            .unwrap()
            .unwrap();
        assert_eq!(entry.word, "candid");
        assert_eq!(entry.synonyms, vec!["honest", "frank"]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service = HttpWordService::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://localhost:8080");
        assert_eq!(service.url("/words/all"), "http://localhost:8080/words/all");
    }

    #[test]
    fn test_date_words_missing_field() {
        let body: DateWords = serde_json::from_str("{}").unwrap();
        assert!(body.words.is_none());
        let body: DateWords = serde_json::from_str(r#"{"words": {"terse": ["brief"]}}"#).unwrap();
        assert_eq!(body.words.unwrap()["terse"], vec!["brief"]);
    }
}
