use std::sync::Arc;
use std::time::Duration;
use crate::core::FeedTransport;
use crate::models::ProfileRecord;

/// Reader for the profile enrichment feed. One attempt, no fallback.
pub struct ProfileFeed {
    transport: Arc<dyn FeedTransport>,
    url: String,
    chain: String,
    timeout: Duration,
}

impl ProfileFeed {
    pub fn new(
        transport: Arc<dyn FeedTransport>,
        url: impl Into<String>,
        chain: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            url: url.into(),
            chain: chain.into(),
            timeout,
        }
    }

    /// Fetch profile records for the target chain; empty on any failure
    pub async fn fetch(&self) -> Vec<ProfileRecord> {
        let items = match self.transport.get_json(&self.url, self.timeout).await {
            Ok(serde_json::Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!("Profile feed returned a non-array body");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Profile feed unavailable: {}", e);
                return Vec::new();
            }
        };

        let records: Vec<ProfileRecord> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<ProfileRecord>(item).ok())
            .filter(|record| record.is_chain(&self.chain))
            .collect();

        tracing::info!("🧩 Profile feed: {} {} records", records.len(), self.chain);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::FixtureTransport;
    use serde_json::json;

    const FEED: &str = "https://profiles.test/latest";

    #[tokio::test]
    async fn test_filters_to_target_chain() {
        let transport = Arc::new(FixtureTransport::new().respond(
            FEED,
            json!([
                { "chainId": "solana", "tokenAddress": "sol1" },
                { "chainId": "ethereum", "tokenAddress": "0xabc" },
                { "chainId": "solana", "tokenAddress": "sol2", "links": [] },
                { "tokenAddress": "untagged" }
            ]),
        ));

        let feed = ProfileFeed::new(transport, FEED, "solana", Duration::from_secs(1));
        let keys: Vec<_> = feed
            .fetch()
            .await
            .iter()
            .filter_map(|r| r.key().map(str::to_string))
            .collect();

        assert_eq!(keys, vec!["sol1", "sol2"]);
    }

    #[tokio::test]
    async fn test_failure_contributes_nothing() {
        let transport = Arc::new(FixtureTransport::new().fail(FEED, "down"));
        let feed = ProfileFeed::new(transport.clone(), FEED, "solana", Duration::from_secs(1));

        assert!(feed.fetch().await.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }
}
