/// Test helper functions and service builders
use super::fake_store::FakeRemoteStore;
use anime_catalog::{init_logger, CatalogConfig, CatalogService};
use std::sync::Arc;
use std::time::Duration;

pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);
pub const LIST_TTL: Duration = Duration::from_secs(300);

pub fn test_config() -> CatalogConfig {
    CatalogConfig {
        query_timeout: QUERY_TIMEOUT,
        list_ttl: LIST_TTL,
    }
}

/// Build a service over `store`, keeping a handle to inspect calls
pub fn build_service(store: FakeRemoteStore) -> (Arc<CatalogService>, Arc<FakeRemoteStore>) {
    init_logger();
    let store = Arc::new(store);
    let service = CatalogService::new(store.clone(), &test_config());
    (Arc::new(service), store)
}

/// (hits, misses, queries)
pub fn counters(service: &CatalogService) -> (u64, u64, u64) {
    let stats = service.metrics().snapshot();
    (stats.hits, stats.misses, stats.queries)
}
