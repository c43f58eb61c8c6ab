use super::{null_as_default, CatalogRecord, EntityKind, SlugKeyed};
use crate::modules::catalog::domain::value_objects::{AiringDay, AudioType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A series as stored in the `animes` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_desktop: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub airing_day: Option<String>,
    #[serde(default)]
    pub total_episodes: Option<i32>,
    #[serde(default)]
    pub current_season: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_names: HashMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_years: HashMap<String, Value>,
    #[serde(default)]
    pub audio_type: Option<String>,
    #[serde(default)]
    pub logo_anime: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub subtitles: Option<String>,
    #[serde(default)]
    pub content_advisory: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub based: HashMap<String, Value>,

    // List membership flags
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_release: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_popular_season: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_releases: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_popular: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_next_season: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_thumbnail: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_movie: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Anime {
    pub fn airing_day(&self) -> Option<AiringDay> {
        self.airing_day.as_deref().and_then(|d| d.parse().ok())
    }

    pub fn audio_type(&self) -> Option<AudioType> {
        self.audio_type.as_deref().and_then(|a| a.parse().ok())
    }
}

impl CatalogRecord for Anime {
    const KIND: EntityKind = EntityKind::Anime;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("anime record without id".to_string());
        }
        if self.slug.trim().is_empty() {
            return Err(format!("anime {} has an empty slug", self.id));
        }
        Ok(())
    }
}

impl SlugKeyed for Anime {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_sparse_row_with_nulls() {
        let anime: Anime = serde_json::from_value(json!({
            "id": "42",
            "slug": "demo-show",
            "name": "Demo Show",
            "genres": null,
            "season_names": null,
            "is_popular": true,
            "score": 8.7,
            "audio_type": "dub",
            "airing_day": "Saturday",
            "updated_at": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(anime.id, "42");
        assert!(anime.genres.is_empty());
        assert!(anime.season_names.is_empty());
        assert!(anime.is_popular);
        assert!(!anime.is_release);
        assert_eq!(anime.audio_type(), Some(AudioType::Dub));
        assert_eq!(anime.airing_day(), Some(AiringDay::Saturday));
        assert!(anime.validate().is_ok());
    }

    #[test]
    fn genres_must_be_an_array() {
        let result = serde_json::from_value::<Anime>(json!({
            "id": "1",
            "slug": "x",
            "name": "X",
            "genres": "Action, Drama"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn null_name_decodes_as_empty() {
        let anime: Anime =
            serde_json::from_value(json!({"id": "2", "slug": "two", "name": null})).unwrap();
        assert_eq!(anime.name, "");
        assert!(anime.validate().is_ok());

        let anime: Anime = serde_json::from_value(json!({"id": "3", "slug": "three"})).unwrap();
        assert_eq!(anime.name, "");
    }

    #[test]
    fn empty_slug_fails_validation() {
        let anime: Anime =
            serde_json::from_value(json!({"id": "1", "slug": " ", "name": "X"})).unwrap();
        assert!(anime.validate().is_err());
    }
}
