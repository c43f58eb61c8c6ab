pub mod metrics;

// Re-export main types
pub use metrics::{CacheMetrics, CacheStats};
