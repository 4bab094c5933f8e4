use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::document::AnalyzerConfig;
use crate::scoring::RubricVariant;

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Oracle credentials and transport settings.
#[derive(Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Application configuration, loaded once at startup and injected everywhere
/// else. Fails startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub oracle: OracleConfig,
    /// Rubric used when a request does not pick one.
    pub rubric: RubricVariant,
    pub analyzer: AnalyzerConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AnalyzerConfig::default();
        let analyzer = AnalyzerConfig {
            bullet_word_threshold: parse_or(
                &lookup,
                "BULLET_WORD_THRESHOLD",
                defaults.bullet_word_threshold,
            )?,
            word_count_min: parse_or(&lookup, "WORD_COUNT_MIN", defaults.word_count_min)?,
            word_count_max: parse_or(&lookup, "WORD_COUNT_MAX", defaults.word_count_max)?,
            preferred_fonts: defaults.preferred_fonts,
        };
        if analyzer.word_count_min == 0 || analyzer.word_count_min > analyzer.word_count_max {
            bail!(
                "WORD_COUNT_MIN ({}) must be positive and not exceed WORD_COUNT_MAX ({})",
                analyzer.word_count_min,
                analyzer.word_count_max
            );
        }

        Ok(Config {
            oracle: OracleConfig {
                api_key: require(&lookup, "GEMINI_API_KEY")?,
                endpoint: lookup("GEMINI_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                timeout_secs: parse_or(&lookup, "ORACLE_TIMEOUT_SECS", 120)?,
                max_retries: parse_or(&lookup, "ORACLE_MAX_RETRIES", 3)?,
            },
            rubric: match lookup("RUBRIC_VARIANT") {
                Some(raw) => raw
                    .parse::<RubricVariant>()
                    .map_err(anyhow::Error::msg)
                    .context("RUBRIC_VARIANT is invalid")?,
                None => RubricVariant::default(),
            },
            analyzer,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("Required environment variable '{key}' is not set"),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} must be valid: {e}")),
        None => Ok(default),
    }
}
