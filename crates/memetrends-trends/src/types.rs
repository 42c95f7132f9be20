//! SerpApi Google Trends response types.
//!
//! Only the `related_queries.rising` branch of the payload is modelled; the
//! provider returns many other keys (`search_metadata`, `top`, ...) that
//! serde ignores.

use memetrends_core::SearchTerm;
use serde::Deserialize;

/// Top-level `search.json` body for `data_type=RELATED_QUERIES`.
#[derive(Debug, Deserialize)]
pub struct TrendsResponse {
    /// Set by SerpApi when the search ran but produced no usable data.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub related_queries: Option<RelatedQueries>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedQueries {
    /// `null`, absent and `[]` all mean "no rising queries".
    #[serde(default)]
    pub rising: Option<Vec<RisingQuery>>,
}

/// A single rising related query.
#[derive(Debug, Deserialize)]
pub struct RisingQuery {
    pub query: String,
    /// Usually a formatted string such as `"+2,450%"` or `"Breakout"`, but
    /// occasionally a bare number.
    pub value: serde_json::Value,
    #[serde(default)]
    pub extracted_value: Option<i64>,
}

impl RisingQuery {
    /// Display form of the rise magnitude.
    #[must_use]
    pub fn display_value(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => self
                .extracted_value
                .map(|v| v.to_string())
                .unwrap_or_default(),
            other => other.to_string(),
        }
    }
}

impl From<RisingQuery> for SearchTerm {
    fn from(item: RisingQuery) -> Self {
        let value = item.display_value();
        SearchTerm {
            query: item.query,
            value,
        }
    }
}
