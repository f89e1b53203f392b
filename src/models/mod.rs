//! Response models for the definition API
//!
//! Typed shapes of the upstream JSON bodies the client returns.

pub mod autocomplete;
pub mod definition;

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub use autocomplete::{AutocompleteList, AutocompleteSuggestion};
pub use definition::{DefinitionList, DefinitionRecord};

/// Field deserializer that reads `null` as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes each element on its own; elements that don't fit `T` are skipped.
pub(crate) fn decode_each<T: DeserializeOwned>(items: Option<Vec<Value>>, kind: &str) -> Vec<T> {
    items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(kind, index, error = %e, "Skipping undecodable upstream record");
                None
            }
        })
        .collect()
}
