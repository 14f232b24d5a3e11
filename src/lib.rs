//! Wordly Core - vocabulary trainer backed by a remote word service
//!
//! Fetches word/synonym pairs, keeps the last fetched list in a local
//! key-value cache, and runs multiple-choice synonym quizzes over it.

pub mod admin;
pub mod cache;
pub mod client;
pub mod config;
pub mod dates;
pub mod driver;
pub mod error;
pub mod fuzzy;
pub mod import;
pub mod questions;
pub mod session;
pub mod store;
pub mod views;
pub mod vocab;

#[cfg(test)]
mod testing;

pub use admin::{build_word_map, parse_bulk, AdminForms, AdminGate, WordInput};
pub use cache::{KeyValueStore, MemoryStore, SqliteStore};
pub use client::{HttpWordService, NewWords, WordMap, WordService};
pub use config::Config;
pub use driver::{FeedbackTimer, QuizDriver};
pub use error::{Error, Result};
pub use questions::{generate_question, Question, QuestionKind};
pub use session::{AnswerOutcome, AnswerRecord, QuizSession, QuizState, QuizSummary};
pub use store::VocabularyStore;
pub use views::{DateView, MonthView, SearchView, WordListView};
pub use vocab::{VocabularySet, WordEntry};
