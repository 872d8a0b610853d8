//! Upstream feed access
//!
//! Transports that fetch JSON documents and the readers that turn the two
//! feeds into wire records.

mod client;
mod fixture;
mod launches;
mod profiles;
mod relay;

pub use client::HttpTransport;
pub use fixture::FixtureTransport;
pub use launches::LaunchFeed;
pub use profiles::ProfileFeed;
pub use relay::RelayRoute;
