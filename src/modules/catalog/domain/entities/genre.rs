use crate::modules::catalog::domain::repositories::OrderBy;
use super::{null_as_default, CatalogRecord, ChildRecord, EntityKind};
use serde::{Deserialize, Serialize};

/// Genre tag attached to an anime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub anime_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl CatalogRecord for Genre {
    const KIND: EntityKind = EntityKind::Genre;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ChildRecord for Genre {
    const PARENT_FIELD: &'static str = "anime_id";

    fn parent_id(&self) -> &str {
        &self.anime_id
    }

    fn remote_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("name")]
    }
}
