use crate::feeds::RelayRoute;
use crate::utils::{AuditorError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LAUNCH_FEED: &str =
    "https://frontend-api.pump.fun/coins?offset=0&limit=200&sort=created_timestamp&order=DESC";

pub const DEFAULT_PROFILE_FEED: &str = "https://api.dexscreener.com/token-profiles/latest/v1";

pub const DEFAULT_CHAIN: &str = "solana";

/// Feed endpoints, transport order and pass limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub launch_feed_url: String,
    pub profile_feed_url: String,
    /// Only profile records tagged with this chain are used
    pub chain: String,
    pub relay_routes: Vec<RelayRoute>,
    /// Bound on each individual request
    pub request_timeout_ms: u64,
    pub max_assets: usize,
    pub poll_interval_ms: u64,
    /// Launches younger than this are flagged new
    pub freshness_window_secs: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            launch_feed_url: DEFAULT_LAUNCH_FEED.to_string(),
            profile_feed_url: DEFAULT_PROFILE_FEED.to_string(),
            chain: DEFAULT_CHAIN.to_string(),
            relay_routes: RelayRoute::DEFAULT_ORDER.to_vec(),
            request_timeout_ms: 4_000,
            max_assets: 150,
            poll_interval_ms: 4_000,
            freshness_window_secs: 60,
        }
    }
}

impl FeedConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.freshness_window_secs)
    }

    /// Load a JSON config file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_http_url("launch feed", &self.launch_feed_url)?;
        validate_http_url("profile feed", &self.profile_feed_url)?;

        if self.chain.trim().is_empty() {
            return Err(AuditorError::InvalidConfig("chain must not be empty".into()));
        }
        if self.relay_routes.is_empty() {
            return Err(AuditorError::InvalidConfig("at least one relay route is required".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(AuditorError::InvalidConfig("request timeout must be positive".into()));
        }
        if self.max_assets == 0 {
            return Err(AuditorError::InvalidConfig("max assets must be positive".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(AuditorError::InvalidConfig("poll interval must be positive".into()));
        }
        if self.freshness_window_secs < 0 {
            return Err(AuditorError::InvalidConfig("freshness window must not be negative".into()));
        }

        Ok(())
    }
}

fn validate_http_url(what: &str, raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| AuditorError::InvalidConfig(format!("{} url '{}': {}", what, raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AuditorError::InvalidConfig(format!(
            "{} url must be http(s), got {}",
            what, scheme
        ))),
    }
}
