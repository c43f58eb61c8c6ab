pub mod anime;
pub mod content_source;
pub mod episode;
pub mod genre;
pub mod movie;
pub mod season;

pub use anime::Anime;
pub use content_source::ContentSource;
pub use episode::Episode;
pub use genre::Genre;
pub use movie::Movie;
pub use season::Season;

use crate::modules::catalog::domain::repositories::OrderBy;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// The entity kinds the catalog knows how to fetch and cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Anime,
    Movie,
    Episode,
    Genre,
    Season,
    ContentSource,
}

impl EntityKind {
    /// Backing collection (table) name in the remote store
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Anime => "animes",
            EntityKind::Movie => "movies",
            EntityKind::Episode => "episodes",
            EntityKind::Genre => "anime_genres",
            EntityKind::Season => "seasons",
            EntityKind::ContentSource => "content_sources",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Anime => "anime",
            EntityKind::Movie => "movie",
            EntityKind::Episode => "episode",
            EntityKind::Genre => "genre",
            EntityKind::Season => "season",
            EntityKind::ContentSource => "content_source",
        };
        f.write_str(name)
    }
}

/// A record fetched from the remote store.
///
/// Records are immutable once decoded; the cache hands out shared `Arc`s.
pub trait CatalogRecord: DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Shape checks beyond what serde enforces
    fn validate(&self) -> Result<(), String> {
        if self.id().trim().is_empty() {
            return Err(format!("{} record without id", Self::KIND));
        }
        Ok(())
    }
}

/// Records addressable by a human-readable slug as well as by id
pub trait SlugKeyed: CatalogRecord {
    fn slug(&self) -> &str;
}

/// Records cached as ordered lists under a parent id
pub trait ChildRecord: CatalogRecord {
    /// Column holding the parent id in the remote collection
    const PARENT_FIELD: &'static str;

    fn parent_id(&self) -> &str;

    /// Order in which the backend should return siblings
    fn remote_order() -> Vec<OrderBy> {
        Vec::new()
    }
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
