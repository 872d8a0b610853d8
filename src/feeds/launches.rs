use std::sync::Arc;
use std::time::Duration;
use crate::core::FeedTransport;
use crate::models::LaunchRecord;
use super::RelayRoute;

/// Reader for the new-launch feed.
///
/// Walks the relay routes in order; the first route that yields a JSON array
/// wins and the rest are never tried. There is no retry within a route.
pub struct LaunchFeed {
    transport: Arc<dyn FeedTransport>,
    url: String,
    routes: Vec<RelayRoute>,
    timeout: Duration,
}

impl LaunchFeed {
    pub fn new(
        transport: Arc<dyn FeedTransport>,
        url: impl Into<String>,
        routes: Vec<RelayRoute>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            url: url.into(),
            routes,
            timeout,
        }
    }

    /// Fetch launch records; empty when every route fails
    pub async fn fetch(&self) -> Vec<LaunchRecord> {
        for route in &self.routes {
            let url = route.wrap(&self.url);

            match self.transport.get_json(&url, self.timeout).await {
                Ok(serde_json::Value::Array(items)) => {
                    let total = items.len();
                    let records: Vec<LaunchRecord> = items
                        .into_iter()
                        .filter_map(|item| serde_json::from_value(item).ok())
                        .collect();

                    if records.len() < total {
                        tracing::debug!(
                            "Skipped {} undecodable launch records",
                            total - records.len()
                        );
                    }

                    tracing::info!("📡 Launch feed via {}: {} records", route, records.len());
                    return records;
                }
                Ok(other) => {
                    tracing::debug!(
                        "Route {} returned a non-array body ({}), trying next",
                        route,
                        json_kind(&other)
                    );
                }
                Err(e) => {
                    tracing::debug!(
                        "Route {} failed over {}: {}",
                        route,
                        self.transport.name(),
                        e
                    );
                }
            }
        }

        tracing::warn!("❌ All {} launch feed routes failed", self.routes.len());
        Vec::new()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
