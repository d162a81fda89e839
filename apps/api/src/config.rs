use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub http_timeout: Duration,
    pub fetch_user_agent: String,
    /// Largest remote page body read by the fetcher.
    pub max_fetch_bytes: usize,
    /// HTML → PDF executable (e.g. `wkhtmltopdf`). PDF output is disabled when unset.
    pub pdf_renderer_bin: Option<String>,
    pub pdf_render_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            http_timeout: Duration::from_secs(10),
            fetch_user_agent: DEFAULT_USER_AGENT.to_string(),
            max_fetch_bytes: 2 * 1024 * 1024,
            pdf_renderer_bin: None,
            pdf_render_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            http_timeout: Duration::from_secs(parse_env(
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
            fetch_user_agent: std::env::var("FETCH_USER_AGENT")
                .unwrap_or(defaults.fetch_user_agent),
            max_fetch_bytes: parse_env("MAX_FETCH_BYTES", defaults.max_fetch_bytes)?,
            pdf_renderer_bin: std::env::var("PDF_RENDERER_BIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            pdf_render_timeout: Duration::from_secs(parse_env(
                "PDF_RENDER_TIMEOUT_SECS",
                defaults.pdf_render_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number (got '{raw}')")),
        Err(_) => Ok(default),
    }
}
