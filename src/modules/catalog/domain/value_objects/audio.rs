use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Spoken language of an audio track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioLanguage {
    Portuguese,
    Japanese,
    Chinese,
    Korean,
}

impl FromStr for AudioLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portuguese" => Ok(AudioLanguage::Portuguese),
            "japanese" => Ok(AudioLanguage::Japanese),
            "chinese" => Ok(AudioLanguage::Chinese),
            "korean" => Ok(AudioLanguage::Korean),
            other => Err(format!("unknown audio language '{}'", other)),
        }
    }
}

/// Subbed, dubbed, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioType {
    Sub,
    Dub,
    Both,
}

impl FromStr for AudioType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sub" => Ok(AudioType::Sub),
            "dub" => Ok(AudioType::Dub),
            "both" => Ok(AudioType::Both),
            other => Err(format!("unknown audio type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Japanese".parse::<AudioLanguage>(), Ok(AudioLanguage::Japanese));
        assert_eq!(" dub ".parse::<AudioType>(), Ok(AudioType::Dub));
        assert!("klingon".parse::<AudioLanguage>().is_err());
    }
}
