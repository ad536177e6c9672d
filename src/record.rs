//! Record decoding
//!
//! One raw JSON array element becomes a [`Record`] or a [`DecodeError`].
//! The schema is strict on the required integer fields and lenient on
//! `name`: absent and null are equivalent, unknown keys are skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Integer identifier of the list a record belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

impl ListId {
    /// Create a new ListId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ListId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ListId> for i64 {
    fn from(id: ListId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ListId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A validated item from the feed
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Item identity, always present
    pub id: i64,
    /// Display name, stored verbatim including surrounding whitespace
    pub name: Option<String>,
}

impl Item {
    /// True if the item has a name that is non-blank after trimming
    ///
    /// Records failing this predicate are dropped at the grouping stage,
    /// not at decode time.
    pub fn has_display_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.trim().is_empty())
    }
}

/// A decoded record: the list it belongs to plus its item payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// The list this record's item is grouped under
    pub list_id: ListId,
    /// The item payload
    pub item: Item,
}

/// Errors produced while decoding a single record
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The array element was not a JSON object
    #[error("record is not a JSON object")]
    NotAnObject,

    /// A required integer field was absent, null, or not an integer
    #[error("record missing integer field `{0}`")]
    MissingField(&'static str),

    /// A known field carried an unsupported JSON type
    #[error("field `{field}` must be a string or null, got {found}")]
    InvalidFieldType {
        /// The offending field name
        field: &'static str,
        /// The JSON type that was actually present
        found: &'static str,
    },
}

impl Record {
    /// Decode one raw JSON value into a record
    ///
    /// `id` and `listId` must be present as integers. `name` may be absent,
    /// null, or a string; any other type fails. Unknown keys are ignored.
    ///
    /// # Errors
    /// Returns [`DecodeError`] identifying the field that failed.
    pub fn decode(value: &Value) -> Result<Self, DecodeError> {
        let map = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let id = required_int(map, "id")?;
        let list_id = required_int(map, "listId")?;

        let name = match map.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(DecodeError::InvalidFieldType {
                    field: "name",
                    found: json_type(other),
                });
            }
        };

        Ok(Record {
            list_id: ListId(list_id),
            item: Item { id, name },
        })
    }
}

// A wrong-typed value fails the same way as an absent one: the schema is
// strict on both required fields.
fn required_int(
    map: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<i64, DecodeError> {
    map.get(field)
        .and_then(Value::as_i64)
        .ok_or(DecodeError::MissingField(field))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_record() {
        let record = Record::decode(&json!({"id": 1, "listId": 2, "name": "Apple"})).unwrap();
        assert_eq!(record.list_id, ListId(2));
        assert_eq!(record.item.id, 1);
        assert_eq!(record.item.name.as_deref(), Some("Apple"));
    }

    #[test]
    fn absent_and_null_name_both_decode_to_none() {
        let absent = Record::decode(&json!({"id": 1, "listId": 1})).unwrap();
        assert_eq!(absent.item.name, None);

        let null = Record::decode(&json!({"id": 1, "listId": 1, "name": null})).unwrap();
        assert_eq!(null.item.name, None);
    }

    #[test]
    fn name_whitespace_is_preserved_verbatim() {
        let record = Record::decode(&json!({"id": 1, "listId": 1, "name": "  Apple "})).unwrap();
        assert_eq!(record.item.name.as_deref(), Some("  Apple "));
    }

    #[test]
    fn missing_id_fails_naming_the_field() {
        let err = Record::decode(&json!({"listId": 1, "name": "Apple"})).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("id"));
        assert_eq!(err.to_string(), "record missing integer field `id`");
    }

    #[test]
    fn missing_list_id_fails_naming_the_field() {
        let err = Record::decode(&json!({"id": 1, "name": "Apple"})).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("listId"));
    }

    #[test]
    fn non_integer_required_field_is_treated_as_missing() {
        let err = Record::decode(&json!({"id": "7", "listId": 1})).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("id"));

        let err = Record::decode(&json!({"id": 1, "listId": 1.5})).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("listId"));

        let err = Record::decode(&json!({"id": 1, "listId": null})).unwrap_err();
        assert_eq!(err, DecodeError::MissingField("listId"));
    }

    #[test]
    fn wrong_typed_name_fails_with_invalid_field_type() {
        let err = Record::decode(&json!({"id": 1, "listId": 1, "name": 42})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidFieldType {
                field: "name",
                found: "number",
            }
        );

        let err = Record::decode(&json!({"id": 1, "listId": 1, "name": ["x"]})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidFieldType {
                field: "name",
                found: "array",
            }
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record = Record::decode(&json!({
            "id": 9,
            "listId": 3,
            "name": "Pear",
            "color": "green",
            "nested": {"a": 1},
        }))
        .unwrap();
        assert_eq!(record.item.id, 9);
        assert_eq!(record.item.name.as_deref(), Some("Pear"));
    }

    #[test]
    fn non_object_element_fails() {
        assert_eq!(
            Record::decode(&json!([1, 2, 3])).unwrap_err(),
            DecodeError::NotAnObject
        );
        assert_eq!(
            Record::decode(&json!("record")).unwrap_err(),
            DecodeError::NotAnObject
        );
    }

    #[test]
    fn has_display_name_filters_blank_names() {
        let item = |name: Option<&str>| Item {
            id: 1,
            name: name.map(str::to_string),
        };
        assert!(!item(None).has_display_name());
        assert!(!item(Some("")).has_display_name());
        assert!(!item(Some("   \t")).has_display_name());
        assert!(item(Some("Apple")).has_display_name());
        assert!(item(Some("  Apple ")).has_display_name());
    }

    #[test]
    fn list_id_display_and_parse_round_trip() {
        let id = ListId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<ListId>().unwrap(), id);
        assert_eq!(id.get(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(ListId::from(42), id);
    }
}
