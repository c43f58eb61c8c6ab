use super::{null_as_default, CatalogRecord, EntityKind, SlugKeyed};
use crate::modules::catalog::domain::value_objects::AudioLanguage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_code: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
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
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub logo_movie: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub subtitles: Option<String>,
    #[serde(default)]
    pub content_advisory: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_released: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Movie {
    pub fn audio(&self) -> Option<AudioLanguage> {
        self.audio.as_deref().and_then(|a| a.parse().ok())
    }
}

impl CatalogRecord for Movie {
    const KIND: EntityKind = EntityKind::Movie;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("movie record without id".to_string());
        }
        if self.public_code.is_empty() || self.slug.is_empty() || self.name.is_empty() {
            return Err(format!(
                "movie {} is missing public_code, slug or name",
                self.id
            ));
        }
        if let Some(audio) = &self.audio {
            audio.parse::<AudioLanguage>()?;
        }
        Ok(())
    }
}

impl SlugKeyed for Movie {
    fn slug(&self) -> &str {
        &self.slug
    }
}
