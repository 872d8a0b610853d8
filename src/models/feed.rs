//! Wire records of the two upstream feeds
//!
//! Both feeds are loosely typed; every field is optional so that a single odd
//! element never invalidates the whole payload.

use super::asset::{Asset, AssetSource};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

/// Longest name synthesized from a profile description
pub const SYNTHETIC_NAME_LEN: usize = 24;

/// Identifier prefix length used as a synthesized symbol
pub const SYNTHETIC_SYMBOL_LEN: usize = 4;

pub const SYNTHETIC_NAME_FALLBACK: &str = "New Pair";

/// Profile-only records are dated slightly in the past
pub const SYNTHETIC_AGE_MS: i64 = 5_000;

/// Symbol stand-in built from the mint prefix
pub fn derive_symbol(mint: &str) -> String {
    mint.chars()
        .take(SYNTHETIC_SYMBOL_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// One element of the new-launch feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchRecord {
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub created_timestamp: Option<f64>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
}

impl LaunchRecord {
    /// Convert into an [`Asset`]; `None` when the record has no mint
    pub fn into_asset(self, now: DateTime<Utc>, freshness: Duration) -> Option<Asset> {
        let mint = self.mint.filter(|m| !m.is_empty())?;

        let created_at = self
            .created_timestamp
            .filter(|ts| ts.is_finite())
            .and_then(|ts| Utc.timestamp_millis_opt(ts as i64).single())
            .unwrap_or_default();

        let market_cap = self
            .usd_market_cap
            .filter(|mc| mc.is_finite() && *mc > 0.0)
            .unwrap_or(0.0);

        let is_new = self.created_timestamp.is_some()
            && now.signed_duration_since(created_at) < freshness;

        let symbol = self
            .symbol
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| derive_symbol(&mint));

        Some(Asset {
            mint,
            name: self.name.unwrap_or_default(),
            symbol,
            description: self.description.filter(|d| !d.is_empty()),
            image_uri: self.image_uri.filter(|i| !i.is_empty()),
            market_cap,
            twitter: self.twitter,
            website: self.website,
            telegram: self.telegram,
            created_at,
            source: AssetSource::Primary,
            is_new,
            is_flash: false,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileLink {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// One element of the profile enrichment feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub token_address: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<ProfileLink>>,
}

impl ProfileRecord {
    pub fn is_chain(&self, chain: &str) -> bool {
        self.chain_id.as_deref() == Some(chain)
    }

    /// Merge key, if the record has one
    pub fn key(&self) -> Option<&str> {
        self.token_address.as_deref().filter(|k| !k.is_empty())
    }

    /// URL of the first link of the given type
    pub fn link(&self, kind: &str) -> Option<&str> {
        self.links
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|l| l.kind.as_deref() == Some(kind))
            .and_then(|l| l.url.as_deref())
    }

    /// Build a minimal asset for a key the launch feed never reported
    pub fn synthesize(&self, now: DateTime<Utc>) -> Option<Asset> {
        let mint = self.key()?;

        let name = self
            .description
            .as_deref()
            .and_then(|d| d.split('\n').next())
            .map(|line| line.chars().take(SYNTHETIC_NAME_LEN).collect::<String>())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| SYNTHETIC_NAME_FALLBACK.to_string());

        let symbol = derive_symbol(mint);

        let mut asset = Asset::new(
            mint,
            now - Duration::milliseconds(SYNTHETIC_AGE_MS),
            AssetSource::Enrichment,
        )
        .with_names(name, symbol);
        asset.description = self.description.clone().filter(|d| !d.is_empty());
        asset.image_uri = self.icon.clone().filter(|i| !i.is_empty());
        asset.is_new = true;

        Some(asset)
    }
}
