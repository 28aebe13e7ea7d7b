//! Custom fields carried next to a resource's fixed fields.
//!
//! TestRail reports project-defined fields as top-level members named
//! `custom_<system name>`. Records keep them in a [`CustomFields`] map keyed by
//! the bare system name; the prefix only exists on the wire.

use crate::error::{ModelError, ModelResult};
use serde::de::{DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub const CUSTOM_FIELD_KEY_PREFIX: &str = "custom_";

/// Removes one leading `custom_` from `key`, if present.
pub fn strip_prefix(key: &str) -> &str {
    key.strip_prefix(CUSTOM_FIELD_KEY_PREFIX).unwrap_or(key)
}

pub fn wire_key(key: &str) -> String {
    format!("{CUSTOM_FIELD_KEY_PREFIX}{key}")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFields {
    fields: HashMap<String, Value>,
}

impl CustomFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields
            .insert(strip_prefix(key).to_string(), value.into());
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(strip_prefix(key))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ModelResult<T> {
        let key = strip_prefix(key);
        let value = self
            .fields
            .get(key)
            .ok_or_else(|| ModelError::MissingCustomField {
                key: key.to_string(),
            })?;
        T::deserialize(value).map_err(|source| ModelError::CustomFieldType {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
            source,
        })
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(strip_prefix(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(strip_prefix(key))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for CustomFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(&wire_key(key), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CustomFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CustomFieldsVisitor;

        impl<'de> Visitor<'de> for CustomFieldsVisitor {
            type Value = CustomFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of resource members")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CustomFields, A::Error> {
                let mut fields = CustomFields::new();
                while let Some(key) = access.next_key::<String>()? {
                    // Members without the prefix are fields this crate does not
                    // know yet; they are dropped so newer servers keep decoding.
                    if key.starts_with(CUSTOM_FIELD_KEY_PREFIX) {
                        let value = access.next_value::<Value>()?;
                        fields.insert(&key, value);
                    } else {
                        access.next_value::<serde::de::IgnoredAny>()?;
                    }
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(CustomFieldsVisitor)
    }
}

/// A resource with an open set of custom fields next to its fixed ones.
pub trait ExtensibleRecord: Sized {
    fn custom_fields(&self) -> &CustomFields;

    fn custom_fields_mut(&mut self) -> &mut CustomFields;

    /// Inserts or overwrites a custom field. `key` may carry the `custom_`
    /// prefix or not; both name the same field.
    fn add_custom_field(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.custom_fields_mut().insert(key, value);
        self
    }

    fn with_custom_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.add_custom_field(key, value);
        self
    }

    /// Reads a custom field as `T`. Like insertion, the key may carry the
    /// `custom_` prefix or not. See
    /// [`FieldType`](crate::types::field::FieldType) for the value shape of
    /// each field type.
    fn custom_field<T: DeserializeOwned>(&self, key: &str) -> ModelResult<T> {
        self.custom_fields().get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_prefix_removes_leading_occurrence_once() {
        assert_eq!(strip_prefix("custom_foo"), "foo");
        assert_eq!(strip_prefix("foo"), "foo");
        assert_eq!(strip_prefix("custom_custom_foo"), "custom_foo");
        assert_eq!(strip_prefix("my_custom_foo"), "my_custom_foo");
    }

    #[test]
    fn test_insert_with_and_without_prefix_is_same_field() {
        let mut fields = CustomFields::new();
        fields.insert("custom_browser", "firefox");
        fields.insert("browser", "chrome");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get::<String>("browser").unwrap(), "chrome");
    }

    #[test]
    fn test_lookups_accept_prefixed_keys() {
        let mut fields = CustomFields::new();
        fields.insert("foo", 3);
        assert_eq!(fields.get::<i64>("custom_foo").unwrap(), 3);
        assert_eq!(fields.get_raw("custom_foo"), Some(&json!(3)));
        assert!(fields.contains_key("custom_foo"));
        assert_eq!(fields.remove("custom_foo"), Some(json!(3)));
        assert!(!fields.contains_key("foo"));
    }

    #[test]
    fn test_get_on_empty_map_is_missing() {
        let fields = CustomFields::new();
        let err = fields.get::<i64>("foo").unwrap_err();
        assert!(matches!(err, ModelError::MissingCustomField { ref key } if key == "foo"));
    }

    #[test]
    fn test_get_with_wrong_type_fails() {
        let mut fields = CustomFields::new();
        fields.insert("automated", true);
        let err = fields.get::<String>("automated").unwrap_err();
        match err {
            ModelError::CustomFieldType { key, expected, .. } => {
                assert_eq!(key, "automated");
                assert!(expected.contains("String"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serialize_reapplies_prefix() {
        let mut fields = CustomFields::new();
        fields.insert("custom_env", "staging");
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value, json!({"custom_env": "staging"}));
    }

    #[test]
    fn test_deserialize_keeps_only_prefixed_members() {
        let fields: CustomFields =
            serde_json::from_value(json!({"custom_foo": 1, "unknown_bar": 2})).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_raw("foo"), Some(&json!(1)));
        assert!(!fields.contains_key("unknown_bar"));
    }
}
