use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::kernel::DEFAULT_FETCH_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "https://api.fireworks.ai/inference/v1";
pub const DEFAULT_MODEL: &str = "accounts/fireworks/models/mixtral-8x7b-instruct";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub fireworks_api_key: String,
    pub fireworks_base_url: String,
    pub model: String,
    pub fetch_timeout: Duration,
    pub model_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let fireworks_api_key = env::var("FIREWORKS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .context("FIREWORKS_API_KEY must be set")?;

        Ok(Self {
            port: parse_or("PORT", 8000).context("PORT must be a valid number")?,
            fireworks_api_key,
            fireworks_base_url: env::var("FIREWORKS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: env::var("COMPLIANCE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            fetch_timeout: Duration::from_secs(
                parse_or("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT.as_secs())
                    .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            model_timeout: Duration::from_secs(
                parse_or("MODEL_TIMEOUT_SECS", 120)
                    .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(default),
    }
}
