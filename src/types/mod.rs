//! Type definitions for copilot-metrics

mod error;
mod metrics;
mod summary;

pub use error::*;
pub use metrics::*;
pub use summary::*;
