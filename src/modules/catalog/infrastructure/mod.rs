pub mod cache;
pub mod external;
pub mod monitoring;

// Re-export commonly used types
pub use cache::{CacheSizes, CacheStore, FreshnessPolicy};
pub use external::SupabaseStore;
pub use monitoring::{CacheMetrics, CacheStats};
