use async_trait::async_trait;
use crate::utils::Result;
use std::time::Duration;

/// Core abstraction: anything that can fetch a JSON document for a feed
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// GET `url` and decode the body as JSON.
    ///
    /// Must give up after `timeout`. Non-2xx responses are errors.
    async fn get_json(&self, url: &str, timeout: Duration) -> Result<serde_json::Value>;
}
