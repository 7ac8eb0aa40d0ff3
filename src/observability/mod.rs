pub mod metrics;
pub mod tracing;

pub use metrics::AccessMetrics;
pub use tracing::init_tracing;
