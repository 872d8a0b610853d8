//! In-memory transport that replays canned feed payloads
//!
//! Used for offline runs of the CLI and for exercising the aggregator without
//! touching the network.

use async_trait::async_trait;
use crate::core::FeedTransport;
use crate::utils::{AuditorError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Json(serde_json::Value),
    Fail(String),
}

#[derive(Debug, Default)]
pub struct FixtureTransport {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`
    pub fn respond(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.replies.insert(url.into(), Reply::Json(body));
        self
    }

    /// Fail every request to `url`
    pub fn fail(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.replies.insert(url.into(), Reply::Fail(reason.into()));
        self
    }

    /// Answer `url` with the JSON stored in `path`
    pub fn respond_from_file(self, url: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let body = serde_json::from_str(&raw)?;
        Ok(self.respond(url, body))
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FeedTransport for FixtureTransport {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn get_json(&self, url: &str, _timeout: Duration) -> Result<serde_json::Value> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.replies.get(url) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Fail(reason)) => Err(AuditorError::MalformedFeed(reason.clone())),
            None => Err(AuditorError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
