pub mod traits;
pub mod aggregator;
pub mod auditor;
pub mod poller;

pub use traits::FeedTransport;
pub use aggregator::{merge, FeedAggregator, MergeOptions};
pub use auditor::{audit, AuditEngine};
pub use poller::{PollUpdate, Poller};
