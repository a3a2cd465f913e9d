//! Lenient decoding of record ids.
//!
//! The record API and the screens pass ids through untyped, so a patient,
//! doctor or chart id may arrive as a JSON string or a number. Ids are kept
//! as strings on our side.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn id_from_value<E: serde::de::Error>(value: Value) -> std::result::Result<Option<String>, E> {
    match value {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Null => Ok(None),
        other => Err(E::custom(format!("expected record id, got {}", other))),
    }
}

/// A required id: string or number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)?
        .ok_or_else(|| serde::de::Error::custom("expected record id, got null"))
}

/// An optional id: string, number or null.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)
}

/// An id where null means "none", stored as the empty string.
pub(crate) fn id_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_from_value(Value::deserialize(deserializer)?)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "string_or_number")]
        required: String,
        #[serde(default, deserialize_with = "optional_id")]
        optional: Option<String>,
        #[serde(default, deserialize_with = "id_or_empty")]
        assigned: String,
    }

    #[test]
    fn test_numbers_become_strings() {
        let ids: Ids =
            serde_json::from_value(json!({"required": 12, "optional": 7, "assigned": 3})).unwrap();
        assert_eq!(ids.required, "12");
        assert_eq!(ids.optional.as_deref(), Some("7"));
        assert_eq!(ids.assigned, "3");
    }

    #[test]
    fn test_null_and_missing() {
        let ids: Ids =
            serde_json::from_value(json!({"required": "p-1", "optional": null, "assigned": null}))
                .unwrap();
        assert_eq!(ids.optional, None);
        assert_eq!(ids.assigned, "");

        let ids: Ids = serde_json::from_value(json!({"required": "p-1"})).unwrap();
        assert_eq!(ids.optional, None);
        assert_eq!(ids.assigned, "");
    }

    #[test]
    fn test_required_rejects_null_and_objects() {
        assert!(serde_json::from_value::<Ids>(json!({"required": null})).is_err());
        assert!(serde_json::from_value::<Ids>(json!({"required": {"id": 1}})).is_err());
    }
}
