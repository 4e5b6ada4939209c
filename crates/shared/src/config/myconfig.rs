use anyhow::{Context, Result, anyhow};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings, loaded once at startup and handed to every client.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            otel_endpoint: None,
            is_dev: false,
            enable_file_log: false,
        }
    }
}

impl Config {
    /// Reads the process environment; binaries load `.env` before calling this.
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url).context("Invalid STOREFRONT_API_URL")?;

        let connect_timeout = parse_secs(
            &lookup,
            "STOREFRONT_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        let request_timeout = parse_secs(
            &lookup,
            "STOREFRONT_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let otel_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty());

        let is_dev = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            api_url,
            connect_timeout,
            request_timeout,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = normalize_api_url(api_url)?;
        Ok(self)
    }
}

/// Trims whitespace and trailing slashes; only http and https origins are accepted.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(anyhow!("API url must not be empty"));
    }

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!(
            "API url must start with http:// or https://, got '{trimmed}'"
        ));
    }

    Ok(trimmed.to_string())
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{key} must be a valid number of seconds"))?;
            if secs == 0 {
                return Err(anyhow!("{key} must be greater than zero"));
            }
            Ok(Duration::from_secs(secs))
        }
        None => Ok(Duration::from_secs(default)),
    }
}
