use crate::modules::catalog::domain::repositories::OrderBy;
use super::{CatalogRecord, ChildRecord, EntityKind};
use crate::modules::catalog::domain::value_objects::SeasonName;
use serde::{Deserialize, Serialize};

/// One broadcast season of an anime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub anime_id: String,
    pub season_number: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub season: Option<SeasonName>,
}

impl CatalogRecord for Season {
    const KIND: EntityKind = EntityKind::Season;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("season record without id".to_string());
        }
        if self.season_number < 1 {
            return Err(format!(
                "season {} has invalid number {}",
                self.id, self.season_number
            ));
        }
        Ok(())
    }
}

impl ChildRecord for Season {
    const PARENT_FIELD: &'static str = "anime_id";

    fn parent_id(&self) -> &str {
        &self.anime_id
    }

    fn remote_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("season_number")]
    }
}
