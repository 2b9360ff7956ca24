use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::resume::FontFamily;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Where generated résumés are saved.
    pub output_dir: PathBuf,
    /// Upstream chat endpoint. Chat is disabled when unset.
    pub chat_endpoint: Option<String>,
    pub carousel_interval: Duration,
    pub status_reset_delay: Duration,
    pub resume_font: FontFamily,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let resume_font = match lookup("RESUME_FONT") {
            Some(name) => FontFamily::parse(&name)
                .ok_or_else(|| anyhow!("RESUME_FONT must be 'helvetica' or 'courier', got '{name}'"))?,
            None => FontFamily::Helvetica,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            output_dir: lookup("FOLIO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./output")),
            chat_endpoint: lookup("CHAT_ENDPOINT").filter(|v| !v.trim().is_empty()),
            carousel_interval: Duration::from_secs(non_zero(
                "CAROUSEL_INTERVAL_SECS",
                parse_or(&lookup, "CAROUSEL_INTERVAL_SECS", 5)?,
            )?),
            status_reset_delay: Duration::from_millis(parse_or(
                &lookup,
                "RESUME_STATUS_RESET_MS",
                3000,
            )?),
            resume_font,
        })
    }
}

fn non_zero(key: &str, value: u64) -> Result<u64> {
    if value == 0 {
        return Err(anyhow!("{key} must be greater than zero"));
    }
    Ok(value)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
