//! Suggestions returned by the `autocomplete-extra` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{decode_each, null_as_default};

/// One autocomplete suggestion.
///
/// Only `term` and `preview` are named; anything else the upstream sends is
/// kept in `extra` so the record round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteSuggestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub term: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub preview: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response envelope of the `autocomplete-extra` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteList {
    #[serde(default)]
    pub results: Option<Vec<Value>>,
}

impl AutocompleteList {
    /// The suggestions, or an empty list when the field was missing or null.
    /// Elements that are not objects are skipped.
    pub fn into_suggestions(self) -> Vec<AutocompleteSuggestion> {
        decode_each(self.results, "autocomplete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_only() {
        let list: AutocompleteList =
            serde_json::from_value(json!({"results": [{"term": "foobar"}]})).unwrap();
        let suggestions = list.into_suggestions();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].term, "foobar");
        assert_eq!(serde_json::to_value(&suggestions[0]).unwrap(), json!({"term": "foobar"}));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = json!({"term": "foo", "preview": "a placeholder", "rank": 4});
        let suggestion: AutocompleteSuggestion = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(suggestion.preview, "a placeholder");
        assert_eq!(suggestion.extra.get("rank"), Some(&json!(4)));
        assert_eq!(serde_json::to_value(&suggestion).unwrap(), raw);
    }

    #[test]
    fn test_null_term_and_non_object_entries() {
        let list: AutocompleteList = serde_json::from_value(
            json!({"results": [{"term": null, "preview": null}, "oops", {"term": "foo"}]}),
        )
        .unwrap();
        let suggestions = list.into_suggestions();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].term, "");
        assert_eq!(suggestions[1].term, "foo");
    }

    #[test]
    fn test_missing_results() {
        let list: AutocompleteList = serde_json::from_value(json!({})).unwrap();
        assert!(list.into_suggestions().is_empty());
    }
}
