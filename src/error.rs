//! Error taxonomy shared by the client, cache, store and quiz engine

use thiserror::Error;

/// Errors surfaced by wordly operations.
///
/// Every variant is recoverable at the point of the triggering action;
/// none of them should ever bring the front-end down.
#[derive(Debug, Error)]
pub enum Error {
    /// Request could not be sent or the response body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("Request to {path} failed with status {status}")]
    HttpStatus { path: String, status: u16 },

    /// User input rejected before any state was touched
    #[error("{0}")]
    Validation(String),

    /// Not enough distinct candidates to build four options
    #[error("Not enough distinct options for a question (need 3 distractors, found {available})")]
    InsufficientData { available: usize },

    #[error("Not enough words available for quiz (requested {requested}, available {available})")]
    InsufficientWords { requested: usize, available: usize },

    /// Quiz operation called in a state that does not accept it
    #[error("Invalid quiz state: {0}")]
    InvalidState(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Import error: {0}")]
    Import(String),
}

impl Error {
    /// True for transport failures and non-2xx responses.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Error::HttpStatus {
                path: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                status: status.as_u16(),
            },
            None => Error::Network(e.to_string()),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Cache(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Cache(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Import(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
