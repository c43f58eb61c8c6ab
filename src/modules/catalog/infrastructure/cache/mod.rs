pub mod cache_store;
pub mod freshness;
pub mod tables;

pub use cache_store::{CacheSizes, CacheStore};
pub use freshness::{FreshnessPolicy, DEFAULT_LIST_TTL};
pub use tables::{CacheTables, CachedChildren, CachedEntity, ChildTable, EntityTable, ListSnapshot};
