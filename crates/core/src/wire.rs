//! Lenient serde helpers for identifiers and optional text on the wire.
//!
//! Browser clients send ids either as JSON numbers or as numeric strings, and
//! use `""` where they mean "absent". These helpers accept all of those forms
//! so both the API and the client gateway can read each other's payloads.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` on `Option` fields.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::types::DbId;

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

/// Number or numeric string -> `i64`; `null` or `""` -> `None`.
pub fn optional_db_id<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Int(id)) => Ok(Some(id)),
        Some(IdRepr::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<DbId>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid id: '{text}'")))
        }
    }
}

/// Number or string -> `String`.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(id) => Ok(id.to_string()),
        IdRepr::Text(text) => Ok(text),
    }
}

/// Number or string -> `Some(String)`; `null` or `""` -> `None`.
pub fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<IdRepr>::deserialize(deserializer)? {
        None => None,
        Some(IdRepr::Int(id)) => Some(id.to_string()),
        Some(IdRepr::Text(text)) if text.is_empty() => None,
        Some(IdRepr::Text(text)) => Some(text),
    })
}

/// `null` or `""` -> `None`. Numbers are stringified, so an asset tag sent as
/// `42` is kept rather than rejected.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_id_string(deserializer)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "super::optional_db_id")]
        sector_id: Option<i64>,
        #[serde(default, deserialize_with = "super::optional_text")]
        asset_id: Option<String>,
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::id_string")]
        id: String,
    }

    fn body(json: serde_json::Value) -> Body {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn numeric_string_id_is_parsed() {
        assert_eq!(body(serde_json::json!({"sector_id": "12"})).sector_id, Some(12));
        assert_eq!(body(serde_json::json!({"sector_id": 12})).sector_id, Some(12));
    }

    #[test]
    fn empty_null_and_missing_ids_are_absent() {
        assert_eq!(body(serde_json::json!({"sector_id": ""})).sector_id, None);
        assert_eq!(body(serde_json::json!({"sector_id": null})).sector_id, None);
        assert_eq!(body(serde_json::json!({})).sector_id, None);
    }

    #[test]
    fn non_numeric_id_is_an_error() {
        let result = serde_json::from_value::<Body>(serde_json::json!({"sector_id": "abc"}));
        assert!(result.is_err());
    }

    #[test]
    fn asset_tag_keeps_leading_zeros() {
        assert_eq!(
            body(serde_json::json!({"asset_id": "0042"})).asset_id.as_deref(),
            Some("0042")
        );
        assert_eq!(body(serde_json::json!({"asset_id": ""})).asset_id, None);
    }

    #[test]
    fn row_id_is_stringified() {
        let row: Row = serde_json::from_value(serde_json::json!({"id": 5})).unwrap();
        assert_eq!(row.id, "5");
    }
}
