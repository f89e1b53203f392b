//! Definition records returned by the `random` and `define` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_each, null_as_default};

/// One user-submitted definition, as sent by the upstream service.
///
/// Field values are passed through verbatim; absent or `null` fields fall
/// back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub definition: String,
    #[serde(deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbs_up: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sound_urls: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defid: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_vote: String,
    #[serde(deserialize_with = "null_as_default")]
    pub written_on: String,
    #[serde(deserialize_with = "null_as_default")]
    pub example: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbs_down: i64,
}

impl DefinitionRecord {
    /// `written_on` as a UTC timestamp, when it parses as RFC 3339.
    pub fn written_on_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.written_on)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Net votes.
    pub fn score(&self) -> i64 {
        self.thumbs_up.saturating_sub(self.thumbs_down)
    }
}

/// Response envelope of the `random` and `define` endpoints.
///
/// Elements stay raw until `into_records`, so one malformed record does not
/// take the rest of the list down with it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionList {
    #[serde(default)]
    pub list: Option<Vec<Value>>,
}

impl DefinitionList {
    /// The definitions, or an empty list when the field was missing or null.
    pub fn into_records(self) -> Vec<DefinitionRecord> {
        decode_each(self.list, "definition")
    }
}
