//! `AppConfig` struct, TOML loading and environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use moviez_api::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use moviez_core::catalog::DEFAULT_LANGUAGE;
use moviez_core::debounce::DEFAULT_DEBOUNCE;
use moviez_core::slider::DEFAULT_SLIDE_INTERVAL;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding `tmdb.base_url`.
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";
/// Environment variable overriding `tmdb.api_token`.
pub const ENV_API_TOKEN: &str = "TMDB_API_TOKEN";
/// Environment variable overriding `tmdb.image_base_url`.
pub const ENV_IMAGE_BASE_URL: &str = "TMDB_IMAGE_SERVICE_URL";
/// Environment variable overriding `tmdb.api_key`.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";

/// Environment variable naming the base config directory.
const ENV_XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
/// Environment variable naming the home directory.
const ENV_HOME: &str = "HOME";
/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Replacement shown for secrets in `config show`.
const MASK: &str = "********";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Browser timing settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// v4 read access token, sent as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Image CDN base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// v3 API key, sent as `api_key` on search and slider requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Response language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Browser timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiConfig {
    /// Slider auto-advance interval in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_interval_secs: Option<u64>,
    /// Search debounce delay in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_debounce_ms: Option<u64>,
}

impl AppConfig {
    /// Location of the config file.
    ///
    /// `dir` (from `--dir`) wins, then `$XDG_CONFIG_HOME/moviez`, then
    /// `$HOME/.config/moviez`. Empty variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is `None` and neither variable is set.
    pub fn path<F>(dir: Option<&Path>, lookup: F) -> Result<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = dir {
            return Ok(dir.join(CONFIG_FILE));
        }
        let get = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };
        let root = get(ENV_XDG_CONFIG_HOME)
            .or_else(|| get(ENV_HOME).map(|home| home.join(".config")))
            .with_context(|| {
                format!("cannot locate the config directory: set {ENV_HOME} or pass --dir")
            })?;
        Ok(root.join("moviez").join(CONFIG_FILE))
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Overrides TMDB settings from the environment. Empty values are ignored.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(ENV_BASE_URL) {
            self.tmdb.base_url = Some(v);
        }
        if let Some(v) = get(ENV_API_TOKEN) {
            self.tmdb.api_token = Some(v);
        }
        if let Some(v) = get(ENV_IMAGE_BASE_URL) {
            self.tmdb.image_base_url = Some(v);
        }
        if let Some(v) = get(ENV_API_KEY) {
            self.tmdb.api_key = Some(v);
        }
        self
    }

    /// Bearer token for TMDB.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured.
    pub fn api_token(&self) -> Result<&str> {
        self.tmdb
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .with_context(|| {
                format!("TMDB API token is not configured: set {ENV_API_TOKEN} or [tmdb] api_token")
            })
    }

    /// Alternate v3 API key, if configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL does not parse.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.tmdb.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).with_context(|| format!("invalid TMDB base URL: {raw}"))
    }

    /// Image CDN base URL.
    #[must_use]
    pub fn image_base_url(&self) -> &str {
        self.tmdb
            .image_base_url
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    /// Response language.
    #[must_use]
    pub fn language(&self) -> &str {
        self.tmdb.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Slider auto-advance interval.
    #[must_use]
    pub fn slide_interval(&self) -> Duration {
        self.ui
            .slide_interval_secs
            .map_or(DEFAULT_SLIDE_INTERVAL, Duration::from_secs)
    }

    /// Search debounce delay.
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        self.ui
            .search_debounce_ms
            .map_or(DEFAULT_DEBOUNCE, Duration::from_millis)
    }

    /// Copy with the token and API key replaced by a mask.
    #[must_use]
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        for secret in [&mut masked.tmdb.api_token, &mut masked.tmdb.api_key] {
            if secret.is_some() {
                *secret = Some(String::from(MASK));
            }
        }
        masked
    }
}
