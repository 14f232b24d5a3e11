//! Vocabulary store: the fetched word list plus its persisted mirror

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cache::KeyValueStore;
use crate::client::WordService;
use crate::dates::format_date;
use crate::error::Result;
use crate::vocab::VocabularySet;

/// Cache slot holding the last fetched vocabulary
pub const CACHE_KEY: &str = "wordPairs";

/// Sole owner of the in-memory vocabulary and its cached copy.
///
/// Quiz sessions get a shared read-only snapshot through [`current`].
///
/// [`current`]: VocabularyStore::current
pub struct VocabularyStore {
    cache: Box<dyn KeyValueStore>,
    service: Arc<dyn WordService>,
    current: Arc<VocabularySet>,
}

impl VocabularyStore {
    pub fn new(cache: Box<dyn KeyValueStore>, service: Arc<dyn WordService>) -> Self {
        Self {
            cache,
            service,
            current: Arc::default(),
        }
    }

    pub fn current(&self) -> Arc<VocabularySet> {
        Arc::clone(&self.current)
    }

    pub fn service(&self) -> &dyn WordService {
        self.service.as_ref()
    }

    /// Fetch `/words/all`, replace the in-memory copy and persist it.
    ///
    /// On failure nothing changes.
    pub async fn load(&mut self) -> Result<Arc<VocabularySet>> {
        let vocab = self.service.all_words().await.map_err(|e| {
            error!("Error fetching words: {}", e);
            e
        })?;
        self.replace(vocab)
    }

    /// Fetch the words of every date and cache their union.
    ///
    /// A single failing date aborts the whole load.
    pub async fn load_dates(&mut self, dates: &[NaiveDate]) -> Result<Arc<VocabularySet>> {
        let mut merged = VocabularySet::default();
        for &date in dates {
            let words = self.service.words_by_date(date).await.map_err(|e| {
                error!("Error fetching words for {}: {}", format_date(date), e);
                e
            })?;
            if words.is_empty() {
                warn!("No words found for {}", format_date(date));
            }
            merged.merge(VocabularySet::from(words));
        }
        self.replace(merged)
    }

    /// Read the persisted copy without touching the network.
    ///
    /// A missing slot yields an empty set; an unreadable one is logged and
    /// treated as empty.
    pub fn restore(&mut self) -> Result<Arc<VocabularySet>> {
        let vocab = match self.cache.get(CACHE_KEY)? {
            Some(json) => VocabularySet::from_json(&json).unwrap_or_else(|e| {
                warn!("Ignoring unreadable vocabulary cache: {}", e);
                VocabularySet::default()
            }),
            None => VocabularySet::default(),
        };
        self.current = Arc::new(vocab);
        Ok(self.current())
    }

    /// Wipe the persisted slot and the in-memory copy.
    pub fn clear(&mut self) -> Result<()> {
        self.cache.clear()?;
        self.current = Arc::default();
        info!("Vocabulary cache cleared");
        Ok(())
    }

    fn replace(&mut self, vocab: VocabularySet) -> Result<Arc<VocabularySet>> {
        self.cache.set(CACHE_KEY, &vocab.to_json()?)?;
        info!("Cached {} words", vocab.len());
        self.current = Arc::new(vocab);
        Ok(self.current())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
