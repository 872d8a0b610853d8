pub mod asset;
pub mod feed;
pub mod report;
pub mod snapshot;

pub use asset::{Asset, AssetSource};
pub use feed::{LaunchRecord, ProfileLink, ProfileRecord};
pub use report::{AuditReport, ReliabilityGrade, StatusTier};
pub use snapshot::MintSnapshot;
