use async_trait::async_trait;
use log::info;

use super::service::CatalogService;
use crate::modules::catalog::domain::NamedList;
use crate::modules::catalog::infrastructure::{CacheSizes, CacheStats};
use crate::shared::utils::logger::{LogContext, TimedOperation};

/// Operational controls over the catalog cache
#[async_trait]
pub trait CacheAdmin: Send + Sync {
    /// Current hit/miss/query counters
    fn get_cache_stats(&self) -> CacheStats;

    /// Drop every cached entry. Counters keep their values.
    fn invalidate_cache(&self);

    fn cache_sizes(&self) -> CacheSizes;

    /// Fetch every stale named list; returns how many were loaded
    async fn warm_cache(&self) -> usize;
}

#[async_trait]
impl CacheAdmin for CatalogService {
    fn get_cache_stats(&self) -> CacheStats {
        self.metrics().snapshot()
    }

    fn invalidate_cache(&self) {
        self.cache().reset();
        info!("Catalog cache invalidated");
    }

    fn cache_sizes(&self) -> CacheSizes {
        self.cache().sizes()
    }

    async fn warm_cache(&self) -> usize {
        let timer = TimedOperation::new("warm catalog cache");
        let mut loaded = 0;

        for list in NamedList::ALL {
            match self.get_named_list(list).await {
                Ok(_) => loaded += 1,
                Err(e) => LogContext::error_with_context(
                    &e,
                    &format!("Failed to warm list {}", list),
                ),
            }
        }

        timer.finish_with_info(&format!("{}/{} lists", loaded, NamedList::ALL.len()));
        loaded
    }
}
