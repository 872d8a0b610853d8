use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use crate::config::FeedConfig;
use crate::core::FeedTransport;
use crate::feeds::{LaunchFeed, ProfileFeed};
use crate::models::asset::enrich_field;
use crate::models::{Asset, AssetSource, LaunchRecord, MintSnapshot, ProfileRecord};

/// Limits applied while merging one pass
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    pub now: DateTime<Utc>,
    pub freshness: Duration,
    pub max_assets: usize,
}

/// Combines the launch feed and the profile feed into one ordered asset list
pub struct FeedAggregator {
    launches: LaunchFeed,
    profiles: ProfileFeed,
    freshness: Duration,
    max_assets: usize,
    clock: fn() -> DateTime<Utc>,
}

impl FeedAggregator {
    pub fn new(launches: LaunchFeed, profiles: ProfileFeed) -> Self {
        let defaults = FeedConfig::default();
        Self {
            launches,
            profiles,
            freshness: defaults.freshness_window(),
            max_assets: defaults.max_assets,
            clock: Utc::now,
        }
    }

    pub fn from_config(config: &FeedConfig, transport: Arc<dyn FeedTransport>) -> Self {
        let launches = LaunchFeed::new(
            transport.clone(),
            config.launch_feed_url.clone(),
            config.relay_routes.clone(),
            config.request_timeout(),
        );
        let profiles = ProfileFeed::new(
            transport,
            config.profile_feed_url.clone(),
            config.chain.clone(),
            config.request_timeout(),
        );

        Self::new(launches, profiles)
            .with_freshness(config.freshness_window())
            .with_max_assets(config.max_assets)
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn with_max_assets(mut self, max_assets: usize) -> Self {
        self.max_assets = max_assets;
        self
    }

    /// Replace the wall clock, e.g. to make passes reproducible
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Run one aggregation pass.
    ///
    /// Never fails: a feed that cannot be reached contributes nothing, so
    /// the result is empty when both are down.
    pub async fn aggregate(&self, prior: &MintSnapshot) -> Vec<Asset> {
        let (launches, profiles) = tokio::join!(self.launches.fetch(), self.profiles.fetch());

        let options = MergeOptions {
            now: (self.clock)(),
            freshness: self.freshness,
            max_assets: self.max_assets,
        };

        let assets = merge(launches, profiles, prior, options);
        tracing::info!("✓ Aggregated {} assets", assets.len());
        assets
    }

    /// Run one pass and pick out a single mint
    pub async fn find(&self, prior: &MintSnapshot, mint: &str) -> Option<Asset> {
        self.aggregate(prior)
            .await
            .into_iter()
            .find(|asset| asset.mint == mint)
    }
}

/// Merge both feeds keyed by mint.
///
/// Launch records go in first. Profile records then enrich matching assets or
/// create minimal ones. Output is newest first, ties by mint, and truncated to
/// `max_assets`.
pub fn merge(
    launches: Vec<LaunchRecord>,
    profiles: Vec<ProfileRecord>,
    prior: &MintSnapshot,
    options: MergeOptions,
) -> Vec<Asset> {
    let mut by_mint: HashMap<String, Asset> =
        HashMap::with_capacity(launches.len() + profiles.len());

    for record in launches {
        if let Some(asset) = record.into_asset(options.now, options.freshness) {
            by_mint.insert(asset.mint.clone(), asset);
        }
    }

    let mut enriched = 0usize;
    for profile in &profiles {
        let Some(key) = profile.key() else {
            continue;
        };

        match by_mint.get_mut(key) {
            Some(existing) => {
                enrich(existing, profile);
                enriched += 1;
            }
            None => {
                if let Some(asset) = profile.synthesize(options.now) {
                    by_mint.insert(asset.mint.clone(), asset);
                }
            }
        }
    }

    tracing::debug!("Merged {} assets, {} enriched", by_mint.len(), enriched);

    let mut assets: Vec<Asset> = by_mint.into_values().collect();
    assets.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.mint.cmp(&b.mint))
    });
    assets.truncate(options.max_assets);

    for asset in &mut assets {
        asset.is_flash = prior.is_flash(&asset.mint);
    }

    assets
}

/// Apply a profile record to an existing asset.
///
/// Only presentational fields change, and only towards non-empty values.
fn enrich(asset: &mut Asset, profile: &ProfileRecord) {
    enrich_field(&mut asset.twitter, profile.link("twitter"));
    enrich_field(&mut asset.website, profile.link("website"));
    enrich_field(&mut asset.telegram, profile.link("telegram"));
    enrich_field(&mut asset.image_uri, profile.icon.as_deref());
    asset.source = AssetSource::Enrichment;
}
