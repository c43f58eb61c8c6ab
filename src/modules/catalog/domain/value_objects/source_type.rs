use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Original medium an adaptation is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Manga,
    LightNovel,
    VisualNovel,
    WebComic,
    Original,
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "manga" => Ok(SourceType::Manga),
            "light_novel" => Ok(SourceType::LightNovel),
            "visual_novel" => Ok(SourceType::VisualNovel),
            "web_comic" => Ok(SourceType::WebComic),
            "original" => Ok(SourceType::Original),
            other => Err(format!("unknown source type '{}'", other)),
        }
    }
}
