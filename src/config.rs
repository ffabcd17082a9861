//! Runtime configuration.
//!
//! Native builds read the process environment: `.env` is loaded first and
//! the bundled `assets/config.env` only fills keys that are not already set.
//! Browsers have no process environment, so wasm builds read the bundled
//! file directly.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::time::Duration;

/// Bundled config for web and mobile builds
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 16;
pub const DEFAULT_PREVIEW_PAGES: u32 = 5;

static CONFIG: Lazy<Config> = Lazy::new(|| {
    load_config().unwrap_or_else(|err| {
        tracing::warn!("invalid configuration, using defaults: {err:#}");
        Config::default()
    })
});

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the document backend, without a trailing slash.
    pub api_base_url: String,
    pub max_upload_bytes: u64,
    /// Page count assumed when placing highlight overlays.
    pub preview_pages: u32,
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            preview_pages: DEFAULT_PREVIEW_PAGES,
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Config from `assets/config.env` alone.
    pub fn from_bundled() -> Result<Self> {
        let pairs = parse_env_lines(BUNDLED_CONFIG);
        Self::from_lookup(|key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
    }

    /// Build a config from any key lookup. Missing or blank keys keep their
    /// defaults; present keys must parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = get("DOCCHAT_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("DOCCHAT_MAX_UPLOAD_MB") {
            let mb: u64 = raw
                .parse()
                .with_context(|| format!("DOCCHAT_MAX_UPLOAD_MB is not a number: {raw}"))?;
            config.max_upload_bytes = mb * 1024 * 1024;
        }
        if let Some(raw) = get("DOCCHAT_PREVIEW_PAGES") {
            let pages: u32 = raw
                .parse()
                .with_context(|| format!("DOCCHAT_PREVIEW_PAGES is not a number: {raw}"))?;
            anyhow::ensure!(pages > 0, "DOCCHAT_PREVIEW_PAGES must be at least 1");
            config.preview_pages = pages;
        }
        if let Some(raw) = get("DOCCHAT_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("DOCCHAT_REQUEST_TIMEOUT_SECS is not a number: {raw}"))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Process-wide configuration, read once on first use.
pub fn get() -> &'static Config {
    &CONFIG
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config (mobile builds)
    load_bundled_config();
}

/// Nothing to load: `std::env::set_var` panics on wasm32, and [`get`] reads
/// the bundled file there instead.
#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> Result<Config> {
    Config::from_env()
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> Result<Config> {
    Config::from_bundled()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(text: &str) -> Vec<(&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.preview_pages, 5);
    }

    #[test]
    fn reads_overrides_and_strips_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("DOCCHAT_API_BASE_URL", "https://docs.example.com/api/"),
            ("DOCCHAT_MAX_UPLOAD_MB", "8"),
            ("DOCCHAT_PREVIEW_PAGES", "12"),
            ("DOCCHAT_REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://docs.example.com/api");
        assert_eq!(config.max_upload_bytes, 8 * 1024 * 1024);
        assert_eq!(config.preview_pages, 12);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_garbage_numbers() {
        assert!(Config::from_lookup(lookup(&[("DOCCHAT_MAX_UPLOAD_MB", "lots")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DOCCHAT_PREVIEW_PAGES", "0")])).is_err());
    }

    #[test]
    fn bundled_config_builds_without_the_environment() {
        let config = Config::from_bundled().unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.preview_pages, DEFAULT_PREVIEW_PAGES);
    }

    #[test]
    fn bundled_config_parses() {
        let pairs = parse_env_lines(BUNDLED_CONFIG);
        assert!(pairs.contains(&("DOCCHAT_API_BASE_URL", DEFAULT_API_BASE_URL)));
        assert!(pairs.iter().all(|(key, _)| !key.starts_with('#')));
    }
}
