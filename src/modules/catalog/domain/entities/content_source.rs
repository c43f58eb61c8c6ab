use super::{null_as_default, CatalogRecord, ChildRecord, EntityKind};
use crate::modules::catalog::domain::value_objects::SourceType;
use serde::{Deserialize, Serialize};

/// Work a movie is adapted from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    pub id: String,
    pub movie_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub author: Option<String>,
}

impl CatalogRecord for ContentSource {
    const KIND: EntityKind = EntityKind::ContentSource;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ChildRecord for ContentSource {
    const PARENT_FIELD: &'static str = "movie_id";

    fn parent_id(&self) -> &str {
        &self.movie_id
    }
}
