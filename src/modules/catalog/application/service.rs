use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};
use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::modules::catalog::domain::{
    Anime, CatalogRecord, ContentSource, Episode, Genre, Movie, NamedList, RemoteQuery,
    RemoteStore, Season, SlugKeyed,
};
use crate::modules::catalog::infrastructure::cache::{
    CacheTables, CachedChildren, CachedEntity, ListSnapshot,
};
use crate::modules::catalog::infrastructure::{
    CacheMetrics, CacheStore, FreshnessPolicy, SupabaseStore,
};
use crate::shared::config::{CatalogConfig, SupabaseConfig};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};

const PAYLOAD_PREVIEW_CHARS: usize = 200;

/// Read-through facade over the catalog cache.
///
/// Every query first consults the [`CacheStore`]; on a miss it asks the
/// [`RemoteStore`] under a fixed timeout, writes the decoded rows back and
/// returns them. Named lists are additionally gated by a [`FreshnessPolicy`],
/// and every anime a list query returns is also written to the anime table
/// so later lookups by id or slug are served from memory.
pub struct CatalogService {
    store: Arc<dyn RemoteStore>,
    cache: Arc<CacheStore>,
    metrics: Arc<CacheMetrics>,
    freshness: FreshnessPolicy,
    query_timeout: Duration,
    cancellation: CancellationToken,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RemoteStore>, config: &CatalogConfig) -> Self {
        Self::with_cache(
            store,
            Arc::new(CacheStore::new()),
            Arc::new(CacheMetrics::new()),
            config,
        )
    }

    /// Build a service over an existing cache and counters
    pub fn with_cache(
        store: Arc<dyn RemoteStore>,
        cache: Arc<CacheStore>,
        metrics: Arc<CacheMetrics>,
        config: &CatalogConfig,
    ) -> Self {
        Self {
            store,
            cache,
            metrics,
            freshness: FreshnessPolicy::new(config.list_ttl),
            query_timeout: config.query_timeout,
            cancellation: CancellationToken::new(),
        }
    }

    /// Wire a service to Supabase using `CATALOG_*` and `SUPABASE_*` variables
    pub async fn from_env() -> AppResult<Self> {
        let catalog = CatalogConfig::from_env()?;
        let supabase = SupabaseConfig::from_env()?;
        let store = SupabaseStore::connect(supabase).await.map_err(|e| {
            LogContext::error_with_context(&e, "Failed to connect to Supabase");
            AppError::backend_unavailable()
        })?;
        Ok(Self::new(Arc::new(store), &catalog))
    }

    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    /// Abandon in-flight fetches when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }

    // Animes

    pub async fn get_anime_by_id(&self, id: &str) -> AppResult<Option<Arc<Anime>>> {
        self.entity_by_id::<Anime>(id).await
    }

    pub async fn get_anime_by_slug(&self, slug: &str) -> AppResult<Option<Arc<Anime>>> {
        self.entity_by_slug::<Anime>(slug).await
    }

    pub async fn get_episodes_by_anime(&self, anime_id: &str) -> AppResult<Arc<[Episode]>> {
        self.children_of::<Episode>(anime_id).await
    }

    pub async fn get_genres_by_anime(&self, anime_id: &str) -> AppResult<Arc<[Genre]>> {
        self.children_of::<Genre>(anime_id).await
    }

    pub async fn get_seasons_by_anime(&self, anime_id: &str) -> AppResult<Arc<[Season]>> {
        self.children_of::<Season>(anime_id).await
    }

    // Movies

    pub async fn get_movie_by_id(&self, id: &str) -> AppResult<Option<Arc<Movie>>> {
        self.entity_by_id::<Movie>(id).await
    }

    pub async fn get_movie_by_slug(&self, slug: &str) -> AppResult<Option<Arc<Movie>>> {
        self.entity_by_slug::<Movie>(slug).await
    }

    pub async fn get_content_sources_by_movie(
        &self,
        movie_id: &str,
    ) -> AppResult<Arc<[ContentSource]>> {
        self.children_of::<ContentSource>(movie_id).await
    }

    // Named lists

    pub async fn get_latest_releases(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::LatestReleases).await
    }

    pub async fn get_popular_animes(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::PopularAnimes).await
    }

    pub async fn get_releasing_animes(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::ReleasingAnimes).await
    }

    pub async fn get_season_popular_animes(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::SeasonPopularAnimes).await
    }

    pub async fn get_next_season_animes(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::NextSeasonAnimes).await
    }

    pub async fn get_thumbnail_animes(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::HasThumbnail).await
    }

    pub async fn get_all_animes(&self) -> AppResult<Arc<[Arc<Anime>]>> {
        self.get_named_list(NamedList::AllAnimes).await
    }

    /// Serve a named list while its snapshot is fresh, otherwise refetch it.
    ///
    /// Every returned anime is also cached by id and slug, unless a snapshot
    /// from a later-issued fetch already replaced this one.
    pub async fn get_named_list(&self, list: NamedList) -> AppResult<Arc<[Arc<Anime>]>> {
        let freshness = &self.freshness;
        let started = Instant::now();

        let found = self
            .read_through(
                list.as_str(),
                list.query(),
                |tables| {
                    tables
                        .get_named_list(list)
                        .filter(|snapshot| freshness.is_fresh(list, snapshot))
                        .map(|snapshot| snapshot.items)
                },
                |tables, rows: Vec<Anime>| {
                    let items: Vec<Arc<Anime>> = rows.into_iter().map(Arc::new).collect();
                    let snapshot = ListSnapshot::fetched(items, started, Instant::now());
                    let items = Arc::clone(&snapshot.items);

                    if tables.put_named_list(list, snapshot) {
                        for anime in items.iter() {
                            tables.put_entity(Arc::clone(anime));
                        }
                    } else {
                        debug!("Newer snapshot of {} already cached, keeping it", list);
                    }
                    Ok(Some(items))
                },
            )
            .await?;

        Ok(found.unwrap_or_else(|| Arc::from(Vec::new())))
    }

    async fn entity_by_id<E: CachedEntity>(&self, id: &str) -> AppResult<Option<Arc<E>>> {
        let id = require_key("id", id)?;
        let query = RemoteQuery::new(E::KIND.collection())
            .filter_eq("id", id)
            .limit(1);

        self.read_through(
            E::KIND.collection(),
            query,
            |tables| tables.get_entity::<E>(id),
            |tables, rows: Vec<E>| {
                ensure_keyed(&rows, "id", id, E::id)?;
                Ok(store_first(tables, rows))
            },
        )
        .await
    }

    async fn entity_by_slug<E>(&self, slug: &str) -> AppResult<Option<Arc<E>>>
    where
        E: CachedEntity + SlugKeyed,
    {
        let slug = require_key("slug", slug)?;
        let query = RemoteQuery::new(E::KIND.collection())
            .filter_eq("slug", slug)
            .limit(1);

        self.read_through(
            E::KIND.collection(),
            query,
            |tables| tables.get_entity_by_secondary_key::<E>(slug),
            |tables, rows: Vec<E>| {
                ensure_keyed(&rows, "slug", slug, E::slug)?;
                Ok(store_first(tables, rows))
            },
        )
        .await
    }

    async fn children_of<C: CachedChildren>(&self, parent_id: &str) -> AppResult<Arc<[C]>> {
        let parent_id = require_key(C::PARENT_FIELD, parent_id)?;
        let query = C::remote_order().into_iter().fold(
            RemoteQuery::new(C::KIND.collection()).filter_eq(C::PARENT_FIELD, parent_id),
            RemoteQuery::order_by,
        );

        let found = self
            .read_through(
                C::KIND.collection(),
                query,
                |tables| tables.get_children::<C>(parent_id),
                |tables, rows: Vec<C>| {
                    ensure_keyed(&rows, C::PARENT_FIELD, parent_id, C::parent_id)?;
                    Ok(Some(tables.put_children(parent_id, rows)))
                },
            )
            .await?;

        Ok(found.unwrap_or_else(|| Arc::from(Vec::new())))
    }

    /// Lookup, fetch on miss, populate.
    ///
    /// `lookup` and `populate` run against the same table generation, so a
    /// fetch that outlives an invalidation writes into the discarded tables.
    /// `populate` returning `None` means nothing was found: no write happens
    /// and the query is not counted. An error from `populate` must be raised
    /// before anything is written.
    async fn read_through<T, R, L, P>(
        &self,
        table: &str,
        query: RemoteQuery,
        lookup: L,
        populate: P,
    ) -> AppResult<Option<T>>
    where
        R: CatalogRecord,
        L: FnOnce(&CacheTables) -> Option<T>,
        P: FnOnce(&CacheTables, Vec<R>) -> AppResult<Option<T>>,
    {
        let tables = self.cache.snapshot();
        let key = query.to_string();

        if let Some(hit) = lookup(&tables) {
            self.metrics.record_hit();
            LogContext::cache_lookup(table, &key, true);
            return Ok(Some(hit));
        }

        self.metrics.record_miss();
        LogContext::cache_lookup(table, &key, false);

        let rows = self.fetch(&query).await?;
        let records = decode_rows::<R>(&query.collection, rows)?;

        match populate(&tables, records)? {
            Some(found) => {
                self.metrics.record_query();
                Ok(Some(found))
            }
            None => {
                debug!("No {} found for {}", R::KIND, key);
                Ok(None)
            }
        }
    }

    async fn fetch(&self, query: &RemoteQuery) -> AppResult<Vec<Value>> {
        let timer = TimedOperation::new(&format!("fetch {}", query));
        let call = tokio::time::timeout(self.query_timeout, self.store.query(query, self.query_timeout));

        let outcome = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                warn!("Fetch of {} cancelled after {}ms", query, timer.elapsed_ms());
                return Err(AppError::Cancelled);
            }
            outcome = call => outcome,
        };

        match outcome {
            Ok(Ok(rows)) => {
                timer.finish_with_info(&format!("{} rows", rows.len()));
                Ok(rows)
            }
            Ok(Err(e)) => {
                LogContext::error_with_context(&e, &format!("Remote query {} failed", query));
                Err(AppError::backend_unavailable())
            }
            Err(_) => {
                error!(
                    "Remote query {} timed out after {:?}",
                    query, self.query_timeout
                );
                Err(AppError::backend_unavailable())
            }
        }
    }
}

fn require_key<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

fn store_first<E: CachedEntity>(tables: &CacheTables, rows: Vec<E>) -> Option<Arc<E>> {
    let entity = Arc::new(rows.into_iter().next()?);
    tables.put_entity(Arc::clone(&entity));
    Some(entity)
}

/// Every row must carry the key it was queried by
fn ensure_keyed<R: CatalogRecord>(
    rows: &[R],
    field: &str,
    expected: &str,
    key: impl Fn(&R) -> &str,
) -> AppResult<()> {
    match rows.iter().enumerate().find(|(_, row)| key(row) != expected) {
        Some((index, row)) => {
            error!(
                "Mis-keyed {} row #{} (id {}): {} is {:?}, queried for {:?}",
                R::KIND,
                index,
                row.id(),
                field,
                key(row),
                expected
            );
            Err(AppError::malformed_record())
        }
        None => Ok(()),
    }
}

/// Decode every row or fail the whole fetch
fn decode_rows<R: CatalogRecord>(collection: &str, rows: Vec<Value>) -> AppResult<Vec<R>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let record = R::deserialize(row).map_err(|e| {
                error!(
                    "Malformed {} row #{} from {}: {} (payload: {})",
                    R::KIND,
                    index,
                    collection,
                    e,
                    payload_preview(row)
                );
                AppError::malformed_record()
            })?;

            record.validate().map_err(|reason| {
                error!(
                    "Invalid {} row #{} from {}: {} (payload: {})",
                    R::KIND,
                    index,
                    collection,
                    reason,
                    payload_preview(row)
                );
                AppError::malformed_record()
            })?;

            Ok(record)
        })
        .collect()
}

fn payload_preview(row: &Value) -> String {
    let text = row.to_string();
    if text.chars().count() <= PAYLOAD_PREVIEW_CHARS {
        return text;
    }
    let mut preview: String = text.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
