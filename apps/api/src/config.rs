use anyhow::{bail, Context, Result};

/// Default key prefix for persisted profile snapshots.
pub const DEFAULT_STORAGE_NAMESPACE: &str = "pathfinder-results-storage";

/// Where profile snapshots are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND must be 'redis' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub redis_url: Option<String>,
    pub storage_namespace: String,
    pub gemini_api_key: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = StoreBackend::parse(
            &std::env::var("STORE_BACKEND").unwrap_or_else(|_| "redis".to_string()),
        )?;
        let redis_url = match store_backend {
            StoreBackend::Redis => Some(require_env("REDIS_URL")?),
            StoreBackend::Memory => std::env::var("REDIS_URL").ok(),
        };

        Ok(Config {
            store_backend,
            redis_url,
            storage_namespace: std::env::var("STORAGE_NAMESPACE")
                .unwrap_or_else(|_| DEFAULT_STORAGE_NAMESPACE.to_string()),
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
