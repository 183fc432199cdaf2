use crate::{LastFmError, Result};
use std::env;

/// Default Last.fm 2.0 API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Default number of results requested from list endpoints.
pub const DEFAULT_LIMIT: u32 = 10;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "LASTFM_API_KEY";
/// Environment variable overriding the API endpoint.
pub const BASE_URL_VAR: &str = "LASTFM_API_BASE_URL";
/// Environment variable overriding the default result limit.
pub const LIMIT_VAR: &str = "LASTFM_RESULT_LIMIT";

/// Configuration for the Last.fm API client.
///
/// The API key is never compiled in; build the config from the environment
/// with [`ClientConfig::from_env`] or pass the key explicitly.
///
/// ```rust
/// use lastfm_explorer::ClientConfig;
///
/// let config = ClientConfig::new("my-key")
///     .with_base_url("http://localhost:8080/2.0/")
///     .with_default_limit(25);
///
/// assert_eq!(config.default_limit, 25);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Last.fm API key
    pub api_key: String,
    /// Endpoint every request is sent to
    pub base_url: String,
    /// Limit used when a caller does not pass one
    pub default_limit: u32,
}

impl ClientConfig {
    /// Create a config for the public endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Read the config from `LASTFM_API_KEY`, `LASTFM_API_BASE_URL` and
    /// `LASTFM_RESULT_LIMIT`. Only the key is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                LastFmError::Config(format!("{API_KEY_VAR} environment variable not set"))
            })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(limit) = lookup(LIMIT_VAR) {
            let limit = limit
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    LastFmError::Config(format!(
                        "{LIMIT_VAR} must be a positive integer, got '{limit}'"
                    ))
                })?;
            config = config.with_default_limit(limit);
        }

        Ok(config)
    }

    /// Set a custom endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the limit used when callers do not pass one (minimum 1)
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit.max(1);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("default_limit", &self.default_limit)
            .finish()
    }
}
