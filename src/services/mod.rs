//! Services for fetching and aggregating Copilot metrics

pub mod aggregator;
pub mod client;
pub mod dashboard;
pub mod indexer;

pub use aggregator::Aggregator;
pub use client::{GitHubClient, MetricsRequest, MetricsSource};
pub use dashboard::{load_dashboard, Dashboard};
pub use indexer::index_by_date;
