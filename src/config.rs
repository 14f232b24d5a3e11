//! Environment configuration

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_CACHE_PATH: &str = "wordly_cache.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub admin_passkey: Option<String>,
    pub cache_path: PathBuf,
    pub feedback_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Read `WORDLY_*` variables, falling back to defaults for unset ones
    pub fn load() -> Result<Self> {
        let admin_passkey = var("WORDLY_ADMIN_PASSKEY");
        if admin_passkey.is_none() {
            warn!("WORDLY_ADMIN_PASSKEY not set, admin forms stay locked");
        }

        Ok(Self {
            backend_url: try_load("WORDLY_BACKEND_URL", DEFAULT_BACKEND_URL)?,
            admin_passkey,
            cache_path: try_load("WORDLY_CACHE_PATH", DEFAULT_CACHE_PATH)?,
            feedback_delay: Duration::from_millis(try_load("WORDLY_FEEDBACK_DELAY_MS", "3000")?),
            request_timeout: Duration::from_secs(try_load("WORDLY_REQUEST_TIMEOUT_SECS", "10")?),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        Error::Validation(format!("Invalid {key} value '{raw}': {e}"))
    })
}
