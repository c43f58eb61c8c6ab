/// Test data factories using builder pattern
///
/// Builders produce raw backend rows (`serde_json::Value`) so tests exercise
/// the same decoding path as production.
use serde_json::{json, Map, Value};

pub struct AnimeFactory {
    fields: Map<String, Value>,
}

impl AnimeFactory {
    pub fn new(id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(id));
        fields.insert("slug".into(), json!(format!("anime-{}", id)));
        fields.insert("name".into(), json!(format!("Test Anime {}", id)));
        Self { fields }
    }

    pub fn complete(id: &str) -> Self {
        Self::new(id)
            .with_score(8.5)
            .with("synopsis", json!("A comprehensive test anime with full data"))
            .with("genres", json!(["Action", "Adventure"]))
            .with("airing_day", json!("saturday"))
            .with("audio_type", json!("sub"))
            .with("total_episodes", json!(24))
            .with("updated_at", json!("2024-04-06T12:00:00Z"))
    }

    pub fn with_slug(self, slug: &str) -> Self {
        self.with("slug", json!(slug))
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with("name", json!(name))
    }

    pub fn with_score(self, score: f64) -> Self {
        self.with("score", json!(score))
    }

    pub fn popular(self) -> Self {
        self.with("is_popular", json!(true))
    }

    pub fn new_release(self) -> Self {
        self.with("new_releases", json!(true))
    }

    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

pub fn episode_row(id: &str, anime_id: &str, season: i32) -> Value {
    json!({
        "id": id,
        "anime_id": anime_id,
        "season": season,
        "title": format!("Episode {}", id),
        "release_date": "2024-01-01T00:00:00Z",
    })
}

pub fn genre_row(id: &str, anime_id: &str, name: &str) -> Value {
    json!({"id": id, "anime_id": anime_id, "name": name})
}

pub fn season_row(id: &str, anime_id: &str, number: i32) -> Value {
    json!({"id": id, "anime_id": anime_id, "season_number": number, "name": "Winter"})
}

pub fn movie_row(id: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "public_code": format!("MV{}", id),
        "slug": slug,
        "name": format!("Test Movie {}", id),
        "audio": "japanese",
        "is_released": true,
    })
}

pub fn content_source_row(id: &str, movie_id: &str) -> Value {
    json!({"id": id, "movie_id": movie_id, "title": "Original work", "author": "Someone"})
}
