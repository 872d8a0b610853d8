use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use crate::core::FeedAggregator;
use crate::models::{Asset, MintSnapshot};

/// Outcome of one polling pass
#[derive(Debug, Clone, PartialEq)]
pub enum PollUpdate {
    /// Fresh, non-empty asset list
    Synced(Vec<Asset>),
    /// Empty pass after earlier data; keep showing what we had
    SyncFailed,
    /// Empty pass and nothing was ever received
    Unavailable,
}

/// Drives the aggregator on a fixed interval.
///
/// Owns the prior-mint snapshot. Passes are awaited one at a time, so calls
/// never overlap.
pub struct Poller {
    aggregator: Arc<FeedAggregator>,
    interval: Duration,
    snapshot: MintSnapshot,
    had_data: bool,
}

impl Poller {
    pub fn new(aggregator: Arc<FeedAggregator>, interval: Duration) -> Self {
        Self {
            aggregator,
            interval,
            snapshot: MintSnapshot::new(),
            had_data: false,
        }
    }

    pub fn snapshot(&self) -> &MintSnapshot {
        &self.snapshot
    }

    /// Run a single pass and fold it into the poller state
    pub async fn poll_once(&mut self) -> PollUpdate {
        let assets = self.aggregator.aggregate(&self.snapshot).await;
        self.observe(assets)
    }

    /// Poll until `cancel` fires.
    ///
    /// A pass still in flight when the token is cancelled is dropped and its
    /// result never reaches `on_update`.
    pub async fn run<F>(mut self, cancel: CancellationToken, mut on_update: F)
    where
        F: FnMut(PollUpdate),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let assets = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Poll cancelled mid-pass, discarding result");
                    break;
                }
                assets = self.aggregator.aggregate(&self.snapshot) => assets,
            };

            on_update(self.observe(assets));
        }

        tracing::info!("Poller stopped");
    }

    fn observe(&mut self, assets: Vec<Asset>) -> PollUpdate {
        if !assets.is_empty() {
            self.snapshot = MintSnapshot::from_assets(&assets);
            self.had_data = true;
            return PollUpdate::Synced(assets);
        }

        if self.had_data {
            tracing::warn!("⚠️  Sync failed, keeping previous snapshot");
            PollUpdate::SyncFailed
        } else {
            tracing::warn!("❌ No data from any feed");
            PollUpdate::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetSource;
    use chrono::Utc;

    fn poller() -> Poller {
        use crate::feeds::{FixtureTransport, LaunchFeed, ProfileFeed, RelayRoute};

        let transport = Arc::new(FixtureTransport::new());
        let launches = LaunchFeed::new(
            transport.clone(),
            "https://launches.test",
            vec![RelayRoute::Direct],
            Duration::from_secs(1),
        );
        let profiles = ProfileFeed::new(
            transport,
            "https://profiles.test",
            "solana",
            Duration::from_secs(1),
        );

        Poller::new(
            Arc::new(FeedAggregator::new(launches, profiles)),
            Duration::from_secs(4),
        )
    }

    fn asset(mint: &str) -> Asset {
        Asset::new(mint, Utc::now(), AssetSource::Primary)
    }

    #[test]
    fn test_state_transitions() {
        let mut poller = poller();

        assert_eq!(poller.observe(Vec::new()), PollUpdate::Unavailable);

        let update = poller.observe(vec![asset("a"), asset("b")]);
        assert!(matches!(update, PollUpdate::Synced(ref assets) if assets.len() == 2));
        assert!(poller.snapshot().contains("a"));

        assert_eq!(poller.observe(Vec::new()), PollUpdate::SyncFailed);
        // snapshot survives a failed pass
        assert_eq!(poller.snapshot().len(), 2);
    }
}
