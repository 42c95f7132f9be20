use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Country presets the dashboard can analyze.
///
/// Each preset carries the localized seed word sent to the trends provider
/// together with its `geo` and `hl` parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "KR")]
    Korea,
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "JP")]
    Japan,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::Korea, Country::UnitedStates, Country::Japan];

    #[must_use]
    pub fn geo(self) -> &'static str {
        match self {
            Country::Korea => "KR",
            Country::UnitedStates => "US",
            Country::Japan => "JP",
        }
    }

    #[must_use]
    pub fn locale(self) -> &'static str {
        match self {
            Country::Korea => "ko",
            Country::UnitedStates => "en",
            Country::Japan => "ja",
        }
    }

    /// The word whose rising related queries are requested.
    #[must_use]
    pub fn seed_term(self) -> &'static str {
        match self {
            Country::Korea => "밈",
            Country::UnitedStates => "meme",
            Country::Japan => "ミーム",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Country::Korea => "Korea",
            Country::UnitedStates => "United States",
            Country::Japan => "Japan",
        }
    }

    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Country::Korea => "🇰🇷",
            Country::UnitedStates => "🇺🇸",
            Country::Japan => "🇯🇵",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Country {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KR" => Ok(Country::Korea),
            "US" => Ok(Country::UnitedStates),
            "JP" => Ok(Country::Japan),
            _ => Err(CoreError::UnknownCountry(s.to_string())),
        }
    }
}

/// How far back a video's publish date may lie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookbackPeriod {
    Day,
    Week,
    Month,
    #[default]
    Year,
}

impl LookbackPeriod {
    pub const ALL: [LookbackPeriod; 4] = [
        LookbackPeriod::Day,
        LookbackPeriod::Week,
        LookbackPeriod::Month,
        LookbackPeriod::Year,
    ];

    #[must_use]
    pub fn days(self) -> u32 {
        match self {
            LookbackPeriod::Day => 1,
            LookbackPeriod::Week => 7,
            LookbackPeriod::Month => 30,
            LookbackPeriod::Year => 365,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LookbackPeriod::Day => "last day",
            LookbackPeriod::Week => "last week",
            LookbackPeriod::Month => "last month",
            LookbackPeriod::Year => "last year",
        }
    }
}

impl std::fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookbackPeriod::Day => write!(f, "day"),
            LookbackPeriod::Week => write!(f, "week"),
            LookbackPeriod::Month => write!(f, "month"),
            LookbackPeriod::Year => write!(f, "year"),
        }
    }
}

impl FromStr for LookbackPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "1d" => Ok(LookbackPeriod::Day),
            "week" | "7d" => Ok(LookbackPeriod::Week),
            "month" | "30d" => Ok(LookbackPeriod::Month),
            "year" | "365d" => Ok(LookbackPeriod::Year),
            _ => Err(CoreError::UnknownPeriod(s.to_string())),
        }
    }
}
