use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonName {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl SeasonName {
    /// Broadcast season for a calendar month (1-12)
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(SeasonName::Winter),
            4..=6 => Some(SeasonName::Spring),
            7..=9 => Some(SeasonName::Summer),
            10..=12 => Some(SeasonName::Fall),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SeasonName::Winter => SeasonName::Spring,
            SeasonName::Spring => SeasonName::Summer,
            SeasonName::Summer => SeasonName::Fall,
            SeasonName::Fall => SeasonName::Winter,
        }
    }
}

impl FromStr for SeasonName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(SeasonName::Winter),
            "spring" => Ok(SeasonName::Spring),
            "summer" => Ok(SeasonName::Summer),
            "fall" | "autumn" => Ok(SeasonName::Fall),
            other => Err(format!("unknown season '{}'", other)),
        }
    }
}
