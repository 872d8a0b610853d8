pub mod config;
pub mod core;
pub mod feeds;
pub mod models;
pub mod utils;

pub use crate::config::FeedConfig;
pub use crate::core::{audit, AuditEngine, FeedAggregator, FeedTransport, PollUpdate, Poller};
pub use crate::models::{Asset, AssetSource, AuditReport, MintSnapshot, StatusTier};
pub use crate::utils::{AuditorError, Result};
