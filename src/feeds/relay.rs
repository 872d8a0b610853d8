//! Relay routes for reaching the launch feed
//!
//! The launch feed is frequently unreachable directly, so it is requested
//! through a fixed preference order of public HTTP relays.

use crate::utils::AuditorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayRoute {
    AllOrigins,
    CorsProxy,
    ThingProxy,
    Direct,
}

impl RelayRoute {
    /// Preferred order used when nothing else is configured
    pub const DEFAULT_ORDER: [RelayRoute; 4] = [
        RelayRoute::AllOrigins,
        RelayRoute::CorsProxy,
        RelayRoute::ThingProxy,
        RelayRoute::Direct,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RelayRoute::AllOrigins => "allorigins",
            RelayRoute::CorsProxy => "corsproxy",
            RelayRoute::ThingProxy => "thingproxy",
            RelayRoute::Direct => "direct",
        }
    }

    /// Rewrite a feed URL so it is fetched through this route
    pub fn wrap(&self, target: &str) -> String {
        match self {
            RelayRoute::AllOrigins => {
                format!("https://api.allorigins.win/raw?url={}", encode_component(target))
            }
            RelayRoute::CorsProxy => format!("https://corsproxy.io/?{}", encode_component(target)),
            RelayRoute::ThingProxy => format!("https://thingproxy.freeboard.io/fetch/{}", target),
            RelayRoute::Direct => target.to_string(),
        }
    }
}

impl std::fmt::Display for RelayRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelayRoute {
    type Err = AuditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allorigins" => Ok(RelayRoute::AllOrigins),
            "corsproxy" => Ok(RelayRoute::CorsProxy),
            "thingproxy" => Ok(RelayRoute::ThingProxy),
            "direct" => Ok(RelayRoute::Direct),
            other => Err(AuditorError::InvalidConfig(format!("unknown relay route '{}'", other))),
        }
    }
}

fn encode_component(target: &str) -> String {
    url::form_urlencoded::byte_serialize(target.as_bytes()).collect()
}
