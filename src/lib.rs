//! Read-through caching layer for anime and movie catalog queries.
//!
//! [`CatalogService`] answers lookups by id, slug, parent and named list
//! from an in-process [`CacheStore`], falling back to a [`RemoteStore`]
//! (Supabase in production) on a miss.

pub mod modules;
pub mod shared;

pub use modules::catalog::{
    Anime, CacheAdmin, CacheMetrics, CacheSizes, CacheStats, CacheStore, CatalogService,
    ContentSource, Episode, FreshnessPolicy, Genre, Movie, NamedList, RemoteQuery, RemoteStore,
    Season, SupabaseStore,
};
pub use shared::utils::logger::init_logger;
pub use shared::{AppError, AppResult, CatalogConfig, ErrorKind, StoreError, SupabaseConfig};
