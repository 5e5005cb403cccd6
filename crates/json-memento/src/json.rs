//! JSON boundary: conversions between [`Value`] and `serde_json`.
//!
//! Only plain values cross this boundary. Serializing an enum member, an
//! instance, or a mapping with a non-string key fails, which is where a value
//! the encoder passed through unchanged finally gets rejected. So does a
//! mapping whose keys collide once encoded, since JSON text would keep only
//! one of the values.

use std::collections::HashSet;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::MementoError;
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                let mut seen = HashSet::with_capacity(entries.len());
                for (key, value) in entries {
                    let Value::Str(key) = key else {
                        return Err(S::Error::custom(format!(
                            "mapping key must be a string, found {}",
                            key.kind()
                        )));
                    };
                    if !seen.insert(key.as_str()) {
                        return Err(S::Error::custom(format!("duplicate mapping key {key:?}")));
                    }
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Enum(member) => Err(S::Error::custom(format!(
                "enum member {member} is not plain JSON"
            ))),
            Value::Object(instance) => Err(S::Error::custom(format!(
                "instance of {} is not plain JSON",
                instance.type_name()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => Value::Seq(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = MementoError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(b)),
            Value::Number(n) => Ok(serde_json::Value::Number(n)),
            Value::Str(s) => Ok(serde_json::Value::String(s)),
            Value::Seq(items) => items
                .into_iter()
                .map(serde_json::Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            Value::Map(entries) => {
                let mut obj = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let Value::Str(key) = key else {
                        return Err(MementoError::NotPlain(format!(
                            "mapping key must be a string, found {}",
                            key.kind()
                        )));
                    };
                    if obj.contains_key(&key) {
                        return Err(MementoError::NotPlain(format!(
                            "duplicate mapping key {key:?}"
                        )));
                    }
                    obj.insert(key, serde_json::Value::try_from(value)?);
                }
                Ok(serde_json::Value::Object(obj))
            }
            Value::Enum(member) => Err(MementoError::NotPlain(format!("enum member {member}"))),
            Value::Object(instance) => Err(MementoError::NotPlain(format!(
                "instance of {}",
                instance.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumMember;
    use serde_json::json;

    #[test]
    fn test_from_serde_json() {
        let value = Value::from(json!({"a": [1, "two", null, true, 2.5]}));
        assert_eq!(
            value,
            Value::map([(
                "a",
                Value::Seq(vec![
                    Value::from(1),
                    Value::from("two"),
                    Value::Null,
                    Value::from(true),
                    Value::from(2.5),
                ])
            )])
        );
    }

    #[test]
    fn test_try_into_serde_json() {
        let value = Value::map([("x", Value::from(vec![1, 2]))]);
        let json = serde_json::Value::try_from(value).unwrap();
        assert_eq!(json, json!({"x": [1, 2]}));
    }

    #[test]
    fn test_try_into_rejects_non_plain() {
        let err = serde_json::Value::try_from(Value::map([(1, 2)])).unwrap_err();
        assert!(matches!(err, MementoError::NotPlain(_)));
        let err =
            serde_json::Value::try_from(Value::from(EnumMember::new("Color", "RED"))).unwrap_err();
        assert_eq!(err.to_string(), "Value is not plain JSON: enum member Color.RED");
    }

    #[test]
    fn test_serialize_preserves_key_order() {
        let value = Value::map([("b", 1), ("a", 2)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_serialize_rejects_non_plain() {
        let err = serde_json::to_string(&Value::map([(true, 1)])).unwrap_err();
        assert!(err.to_string().contains("mapping key must be a string"));
        let err = serde_json::to_string(&Value::from(EnumMember::new("Color", "RED"))).unwrap_err();
        assert!(err.to_string().contains("is not plain JSON"));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let value = Value::map([("k", 1), ("k", 2)]);
        let err = serde_json::to_string(&value).unwrap_err();
        assert!(err.to_string().contains("duplicate mapping key \"k\""), "got: {err}");
        let err = serde_json::Value::try_from(value).unwrap_err();
        assert!(matches!(err, MementoError::NotPlain(_)));
    }

    #[test]
    fn test_deserialize() {
        let value: Value = serde_json::from_str(r#"{"k": [1.5, "s"]}"#).unwrap();
        assert_eq!(
            value,
            Value::map([("k", Value::Seq(vec![Value::from(1.5), Value::from("s")]))])
        );
    }
}
