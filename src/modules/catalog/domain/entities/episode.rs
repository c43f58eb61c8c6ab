use crate::modules::catalog::domain::repositories::OrderBy;
use super::{null_as_default, CatalogRecord, ChildRecord, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub anime_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    /// Flagged as a new release in the catalog
    #[serde(rename = "is_lancamento", default, deserialize_with = "null_as_default")]
    pub is_new_release: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogRecord for Episode {
    const KIND: EntityKind = EntityKind::Episode;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ChildRecord for Episode {
    const PARENT_FIELD: &'static str = "anime_id";

    fn parent_id(&self) -> &str {
        &self.anime_id
    }

    fn remote_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("season"), OrderBy::asc("release_date")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_title_and_season_decode_as_defaults() {
        let episode: Episode = serde_json::from_value(json!({
            "id": "e1",
            "anime_id": "42",
            "season": null,
            "title": null,
            "is_lancamento": true
        }))
        .unwrap();

        assert_eq!(episode.title, "");
        assert_eq!(episode.season, 0);
        assert!(episode.is_new_release);
        assert_eq!(episode.parent_id(), "42");
    }

    #[test]
    fn missing_parent_is_a_decode_error() {
        assert!(serde_json::from_value::<Episode>(json!({"id": "e1", "title": "x"})).is_err());
    }
}
