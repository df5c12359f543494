use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which key-value backend holds the About page record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            other => bail!("Unknown storage backend '{other}' (expected memory, file or redis)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub storage_path: PathBuf,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub chat_reply_delay: Duration,
    /// Resume and chat sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
    pub session_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend: StorageBackend = optional_env("STORAGE_BACKEND")
            .unwrap_or_else(|| "file".to_string())
            .parse()?;

        let redis_url = optional_env("REDIS_URL");
        if storage_backend == StorageBackend::Redis && redis_url.is_none() {
            bail!("REDIS_URL must be set when STORAGE_BACKEND=redis");
        }

        let chat_reply_delay_ms = optional_env("CHAT_REPLY_DELAY_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse::<u64>()
            .context("CHAT_REPLY_DELAY_MS must be a whole number of milliseconds")?;

        let session_idle_ttl_secs = optional_env("SESSION_IDLE_TTL_SECS")
            .unwrap_or_else(|| "1800".to_string())
            .parse::<u64>()
            .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;
        let session_sweep_interval_secs = optional_env("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("SESSION_SWEEP_INTERVAL_SECS must be a whole number of seconds")?;
        if session_sweep_interval_secs == 0 {
            bail!("SESSION_SWEEP_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            storage_backend,
            storage_path: optional_env("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/portfolio.json")),
            redis_url,
            redis_key_prefix: optional_env("REDIS_KEY_PREFIX")
                .unwrap_or_else(|| "portfolio:".to_string()),
            chat_reply_delay: Duration::from_millis(chat_reply_delay_ms),
            session_idle_ttl: Duration::from_secs(session_idle_ttl_secs),
            session_sweep_interval: Duration::from_secs(session_sweep_interval_secs),
        })
    }

    /// Configuration used by tests: in-memory storage, short chat delay.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            storage_backend: StorageBackend::Memory,
            storage_path: PathBuf::from("unused.json"),
            redis_url: None,
            redis_key_prefix: "portfolio:".to_string(),
            chat_reply_delay: Duration::from_millis(1000),
            session_idle_ttl: Duration::from_secs(60),
            session_sweep_interval: Duration::from_secs(10),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
