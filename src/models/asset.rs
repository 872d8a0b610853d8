use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder image service used when a feed supplies no image
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://api.dicebear.com/7.x/identicon/svg?seed=";

/// Which upstream feed produced or last enriched a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetSource {
    /// New-launch firehose
    Primary,
    /// Profile metadata feed
    Enrichment,
}

/// One tracked token launch, keyed by `mint`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// USD market cap; 0 means unknown
    pub market_cap: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: AssetSource,
    /// Created within the freshness window
    pub is_new: bool,
    /// Not present in the previous poll's snapshot
    pub is_flash: bool,
}

impl Asset {
    pub fn new(mint: impl Into<String>, created_at: DateTime<Utc>, source: AssetSource) -> Self {
        Self {
            mint: mint.into(),
            name: String::new(),
            symbol: String::new(),
            description: None,
            image_uri: None,
            market_cap: 0.0,
            twitter: None,
            website: None,
            telegram: None,
            created_at,
            source,
            is_new: false,
            is_flash: false,
        }
    }

    pub fn with_names(mut self, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.name = name.into();
        self.symbol = symbol.into();
        self
    }

    pub fn with_links(
        mut self,
        twitter: Option<&str>,
        website: Option<&str>,
        telegram: Option<&str>,
    ) -> Self {
        self.twitter = twitter.map(str::to_string);
        self.website = website.map(str::to_string);
        self.telegram = telegram.map(str::to_string);
        self
    }

    /// Number of non-empty social links (0-3)
    pub fn social_count(&self) -> usize {
        [&self.twitter, &self.website, &self.telegram]
            .into_iter()
            .filter(|link| is_present(link))
            .count()
    }

    /// Image to render, falling back to an identicon seeded by the mint
    pub fn display_image(&self) -> String {
        match self.image_uri.as_deref() {
            Some(uri) if !uri.is_empty() => uri.to_string(),
            _ => format!("{}{}", PLACEHOLDER_IMAGE_BASE, self.mint),
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
    }
}

/// A link counts only when it is set and non-empty
pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.is_empty())
}

/// Overwrite `slot` with `incoming` unless `incoming` is empty.
/// Returns true when the slot changed.
pub(crate) fn enrich_field(slot: &mut Option<String>, incoming: Option<&str>) -> bool {
    match incoming {
        Some(value) if !value.is_empty() => {
            if slot.as_deref() == Some(value) {
                return false;
            }
            *slot = Some(value.to_string());
            true
        }
        _ => false,
    }
}
