use async_trait::async_trait;
use crate::core::FeedTransport;
use crate::utils::{AuditorError, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("launch-auditor/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get_json(&self, url: &str, timeout: Duration) -> Result<serde_json::Value> {
        tracing::debug!("GET {}", url);

        match tokio::time::timeout(timeout, self.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(AuditorError::Timeout {
                url: url.to_string(),
                after: timeout,
            }),
        }
    }
}
