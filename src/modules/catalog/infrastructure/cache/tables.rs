use crate::modules::catalog::domain::{
    Anime, CatalogRecord, ChildRecord, ContentSource, Episode, Genre, Movie, NamedList, Season,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::time::Instant;

/// Entity kinds with their own primary table in the cache
pub trait CachedEntity: CatalogRecord {
    fn table(tables: &CacheTables) -> &EntityTable<Self>;

    /// Alternate lookup key, if this kind carries one
    fn secondary_key(&self) -> Option<&str> {
        None
    }
}

/// Child kinds cached as whole lists under a parent id
pub trait CachedChildren: ChildRecord {
    fn table(tables: &CacheTables) -> &ChildTable<Self>;
}

/// Primary table (id -> record) plus an optional secondary index (key -> id)
#[derive(Debug)]
pub struct EntityTable<E> {
    primary: DashMap<String, Arc<E>>,
    secondary: DashMap<String, String>,
}

impl<E> Default for EntityTable<E> {
    fn default() -> Self {
        Self {
            primary: DashMap::new(),
            secondary: DashMap::new(),
        }
    }
}

impl<E: CachedEntity> EntityTable<E> {
    pub fn get(&self, id: &str) -> Option<Arc<E>> {
        self.primary.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Resolve a secondary key to a primary id without touching the record
    pub fn resolve(&self, key: &str) -> Option<String> {
        self.secondary.get(key).map(|entry| entry.value().clone())
    }

    pub fn get_by_secondary(&self, key: &str) -> Option<Arc<E>> {
        let id = self.resolve(key)?;
        let entity = self.get(&id)?;
        // The index entry may predate a refetch that changed the key.
        if entity.secondary_key() == Some(key) {
            Some(entity)
        } else {
            None
        }
    }

    /// The primary record is always visible before its index entry
    pub fn put(&self, entity: Arc<E>) {
        let id = entity.id().to_string();
        let key = entity.secondary_key().map(str::to_string);

        self.primary.insert(id.clone(), entity);
        if let Some(key) = key {
            self.secondary.insert(key, id);
        }
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }
}

/// parent id -> ordered children, replaced as a unit
#[derive(Debug)]
pub struct ChildTable<C> {
    lists: DashMap<String, Arc<[C]>>,
}

impl<C> Default for ChildTable<C> {
    fn default() -> Self {
        Self {
            lists: DashMap::new(),
        }
    }
}

impl<C: CachedChildren> ChildTable<C> {
    pub fn get(&self, parent_id: &str) -> Option<Arc<[C]>> {
        self.lists.get(parent_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn put(&self, parent_id: &str, children: Vec<C>) -> Arc<[C]> {
        let children: Arc<[C]> = Arc::from(children);
        self.lists.insert(parent_id.to_string(), Arc::clone(&children));
        children
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// A named list as last fetched from the backend
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub items: Arc<[Arc<Anime>]>,
    /// When the fetch that produced this snapshot was issued
    pub started_at: Instant,
    /// When the rows arrived. Freshness is measured from here.
    pub fetched_at: Instant,
}

impl ListSnapshot {
    pub fn new(items: Vec<Arc<Anime>>, at: Instant) -> Self {
        Self::fetched(items, at, at)
    }

    pub fn fetched(items: Vec<Arc<Anime>>, started_at: Instant, fetched_at: Instant) -> Self {
        Self {
            items: Arc::from(items),
            started_at,
            fetched_at,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One generation of cache state. `CacheStore::reset` swaps in a new one.
#[derive(Debug, Default)]
pub struct CacheTables {
    pub(crate) animes: EntityTable<Anime>,
    pub(crate) movies: EntityTable<Movie>,
    pub(crate) episodes: ChildTable<Episode>,
    pub(crate) genres: ChildTable<Genre>,
    pub(crate) seasons: ChildTable<Season>,
    pub(crate) content_sources: ChildTable<ContentSource>,
    pub(crate) named_lists: DashMap<NamedList, ListSnapshot>,
}

impl CacheTables {
    pub fn get_entity<E: CachedEntity>(&self, id: &str) -> Option<Arc<E>> {
        E::table(self).get(id)
    }

    pub fn get_entity_by_secondary_key<E: CachedEntity>(&self, key: &str) -> Option<Arc<E>> {
        E::table(self).get_by_secondary(key)
    }

    pub fn resolve_secondary_key<E: CachedEntity>(&self, key: &str) -> Option<String> {
        E::table(self).resolve(key)
    }

    pub fn put_entity<E: CachedEntity>(&self, entity: Arc<E>) {
        E::table(self).put(entity)
    }

    pub fn get_children<C: CachedChildren>(&self, parent_id: &str) -> Option<Arc<[C]>> {
        C::table(self).get(parent_id)
    }

    pub fn put_children<C: CachedChildren>(&self, parent_id: &str, children: Vec<C>) -> Arc<[C]> {
        C::table(self).put(parent_id, children)
    }

    pub fn get_named_list(&self, list: NamedList) -> Option<ListSnapshot> {
        self.named_lists.get(&list).map(|entry| entry.value().clone())
    }

    /// Store a snapshot unless one from a later-issued fetch is already present.
    ///
    /// Returns `false` when the write was discarded as stale.
    pub fn put_named_list(&self, list: NamedList, snapshot: ListSnapshot) -> bool {
        match self.named_lists.entry(list) {
            Entry::Occupied(mut existing) => {
                if existing.get().started_at > snapshot.started_at {
                    return false;
                }
                existing.insert(snapshot);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
                true
            }
        }
    }
}

impl CachedEntity for Anime {
    fn table(tables: &CacheTables) -> &EntityTable<Self> {
        &tables.animes
    }

    fn secondary_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl CachedEntity for Movie {
    fn table(tables: &CacheTables) -> &EntityTable<Self> {
        &tables.movies
    }

    fn secondary_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl CachedChildren for Episode {
    fn table(tables: &CacheTables) -> &ChildTable<Self> {
        &tables.episodes
    }
}

impl CachedChildren for Genre {
    fn table(tables: &CacheTables) -> &ChildTable<Self> {
        &tables.genres
    }
}

impl CachedChildren for Season {
    fn table(tables: &CacheTables) -> &ChildTable<Self> {
        &tables.seasons
    }
}

impl CachedChildren for ContentSource {
    fn table(tables: &CacheTables) -> &ChildTable<Self> {
        &tables.content_sources
    }
}
