use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if the API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single generation call. Elapsing counts as an upstream failure.
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            port: parse_port(std::env::var("PORT").ok())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: parse_timeout(std::env::var("LLM_TIMEOUT_SECS").ok())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    match raw {
        Some(value) => value
            .parse::<u16>()
            .context("PORT must be a valid port number"),
        None => Ok(DEFAULT_PORT),
    }
}

fn parse_timeout(raw: Option<String>) -> Result<Duration> {
    let secs = match raw {
        Some(value) => value
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
        None => DEFAULT_LLM_TIMEOUT_SECS,
    };
    Ok(Duration::from_secs(secs))
}
