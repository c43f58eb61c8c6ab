use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weekday on which new episodes are released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiringDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl FromStr for AiringDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(AiringDay::Monday),
            "tuesday" => Ok(AiringDay::Tuesday),
            "wednesday" => Ok(AiringDay::Wednesday),
            "thursday" => Ok(AiringDay::Thursday),
            "friday" => Ok(AiringDay::Friday),
            "saturday" => Ok(AiringDay::Saturday),
            "sunday" => Ok(AiringDay::Sunday),
            other => Err(format!("unknown airing day '{}'", other)),
        }
    }
}

impl From<AiringDay> for chrono::Weekday {
    fn from(day: AiringDay) -> Self {
        match day {
            AiringDay::Monday => chrono::Weekday::Mon,
            AiringDay::Tuesday => chrono::Weekday::Tue,
            AiringDay::Wednesday => chrono::Weekday::Wed,
            AiringDay::Thursday => chrono::Weekday::Thu,
            AiringDay::Friday => chrono::Weekday::Fri,
            AiringDay::Saturday => chrono::Weekday::Sat,
            AiringDay::Sunday => chrono::Weekday::Sun,
        }
    }
}
