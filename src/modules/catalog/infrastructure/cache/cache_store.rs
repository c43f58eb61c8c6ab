use super::tables::{CacheTables, CachedChildren, CachedEntity, ListSnapshot};
use crate::modules::catalog::domain::{Anime, NamedList};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};

/// Entry counts per table, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheSizes {
    pub animes: usize,
    pub movies: usize,
    pub episode_lists: usize,
    pub genre_lists: usize,
    pub season_lists: usize,
    pub content_source_lists: usize,
    pub named_lists: usize,
}

impl CacheSizes {
    pub fn total(&self) -> usize {
        self.animes
            + self.movies
            + self.episode_lists
            + self.genre_lists
            + self.season_lists
            + self.content_source_lists
            + self.named_lists
    }
}

/// Process-local catalog cache.
///
/// Each table is an independent `DashMap`; there is no cross-table
/// transaction. `reset` replaces the whole table set, and callers that
/// took a [`snapshot`](Self::snapshot) before the reset keep operating on
/// the old generation.
#[derive(Debug)]
pub struct CacheStore {
    tables: RwLock<Arc<CacheTables>>,
    generation: AtomicU64,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Arc::new(CacheTables::default())),
            generation: AtomicU64::new(0),
        }
    }

    /// Current table generation. Reads and writes made through the returned
    /// handle stay on that generation even if the store is reset meanwhile.
    pub fn snapshot(&self) -> Arc<CacheTables> {
        let guard = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Number of resets performed since construction
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn get_entity<E: CachedEntity>(&self, id: &str) -> Option<Arc<E>> {
        self.snapshot().get_entity(id)
    }

    pub fn get_entity_by_secondary_key<E: CachedEntity>(&self, key: &str) -> Option<Arc<E>> {
        self.snapshot().get_entity_by_secondary_key(key)
    }

    pub fn resolve_secondary_key<E: CachedEntity>(&self, key: &str) -> Option<String> {
        self.snapshot().resolve_secondary_key::<E>(key)
    }

    pub fn put_entity<E: CachedEntity>(&self, entity: E) -> Arc<E> {
        let entity = Arc::new(entity);
        self.snapshot().put_entity(Arc::clone(&entity));
        debug!("Cached {} {}", E::KIND, entity.id());
        entity
    }

    pub fn get_children<C: CachedChildren>(&self, parent_id: &str) -> Option<Arc<[C]>> {
        self.snapshot().get_children(parent_id)
    }

    pub fn put_children<C: CachedChildren>(&self, parent_id: &str, children: Vec<C>) -> Arc<[C]> {
        let count = children.len();
        let stored = self.snapshot().put_children(parent_id, children);
        debug!("Cached {} {} entries for {}", count, C::KIND, parent_id);
        stored
    }

    pub fn get_named_list(&self, list: NamedList) -> Option<ListSnapshot> {
        self.snapshot().get_named_list(list)
    }

    /// Overwrite one named list and its timestamp. Other lists are untouched.
    pub fn put_named_list(&self, list: NamedList, items: Vec<Arc<Anime>>, fetched_at: Instant) -> bool {
        let count = items.len();
        let applied = self
            .snapshot()
            .put_named_list(list, ListSnapshot::new(items, fetched_at));
        if applied {
            debug!("Cached {} entries for list {}", count, list);
        } else {
            debug!("Discarded stale snapshot for list {}", list);
        }
        applied
    }

    /// Drop every table by swapping in an empty generation
    pub fn reset(&self) {
        let mut guard = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(CacheTables::default());
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!("Cache reset (generation {})", generation);
    }

    pub fn sizes(&self) -> CacheSizes {
        let tables = self.snapshot();
        CacheSizes {
            animes: tables.animes.len(),
            movies: tables.movies.len(),
            episode_lists: tables.episodes.len(),
            genre_lists: tables.genres.len(),
            season_lists: tables.seasons.len(),
            content_source_lists: tables.content_sources.len(),
            named_lists: tables.named_lists.len(),
        }
    }
}
