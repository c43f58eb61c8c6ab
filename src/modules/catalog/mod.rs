pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{CacheAdmin, CatalogService};
pub use domain::{
    Anime, ContentSource, Episode, Genre, Movie, NamedList, RemoteQuery, RemoteStore, Season,
};
pub use infrastructure::{CacheMetrics, CacheSizes, CacheStats, CacheStore, FreshnessPolicy, SupabaseStore};
