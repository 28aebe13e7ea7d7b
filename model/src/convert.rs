//! Serde converters for the non-JSON-native encodings TestRail uses.
//!
//! Timestamps need no module here: fields use
//! `chrono::serde::ts_seconds_option`, which already writes whole epoch
//! seconds and drops sub-second precision.

/// `Vec<String>` <-> `"a,b,c"`.
pub mod comma_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn join(items: &[String]) -> String {
        items.join(",")
    }

    pub fn split(value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }
        value.split(',').map(str::to_string).collect()
    }

    pub fn serialize<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&join(items))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(split).unwrap_or_default())
    }
}

/// Booleans the service sends as `0`/`1`.
pub mod int_bool {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct IntBoolVisitor;

        impl Visitor<'_> for IntBoolVisitor {
            type Value = bool;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean or an integer flag")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
                Ok(value)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
                Ok(value != 0)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
                Ok(value != 0)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(false);
                }
                value.parse::<i64>().map(|flag| flag != 0).map_err(E::custom)
            }

            fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }
        }

        deserializer.deserialize_any(IntBoolVisitor)
    }
}

/// Dropdown and multi-select choices, sent as `"1, First\n2, Second"`.
pub mod option_items {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Vec<(String, String)> {
        value
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once(',') {
                Some((key, label)) => (key.trim().to_string(), label.trim().to_string()),
                None => (line.trim().to_string(), String::new()),
            })
            .collect()
    }

    pub fn format(items: &[(String, String)]) -> String {
        items
            .iter()
            .map(|(key, label)| format!("{key}, {label}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn serialize<S: Serializer>(
        items: &[(String, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(items))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, String)>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(parse).unwrap_or_default())
    }
}

/// Counts such as `rows` that the service sends either as numbers or as
/// numeric strings (`"5"`, or `""` when unset).
pub mod int_or_string {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_u32(*value),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        struct IntOrStringVisitor;

        impl Visitor<'_> for IntOrStringVisitor {
            type Value = Option<u32>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Option<u32>, E> {
                u32::try_from(value).map(Some).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Option<u32>, E> {
                u32::try_from(value).map(Some).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Option<u32>, E> {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(None);
                }
                value.parse().map(Some).map_err(E::custom)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Option<u32>, E> {
                Ok(None)
            }
        }

        deserializer.deserialize_any(IntOrStringVisitor)
    }
}

/// Optional integers that may arrive as numeric strings, with `""` meaning
/// unset. Used for option defaults such as integer and user fields.
pub mod lenient_int {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_i64(*value),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        struct LenientIntVisitor;

        impl Visitor<'_> for LenientIntVisitor {
            type Value = Option<i64>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer, a numeric string or an empty string")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Option<i64>, E> {
                Ok(Some(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Option<i64>, E> {
                i64::try_from(value).map(Some).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Option<i64>, E> {
                let value = value.trim();
                if value.is_empty() {
                    return Ok(None);
                }
                value.parse().map(Some).map_err(E::custom)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Option<i64>, E> {
                Ok(None)
            }
        }

        deserializer.deserialize_any(LenientIntVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Defects {
        #[serde(default, with = "comma_list")]
        defects: Vec<String>,
    }

    #[test]
    fn test_comma_list_round_trip() {
        let items = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(comma_list::join(&items), "A,B,C");
        assert_eq!(comma_list::split("A,B,C"), items);

        assert_eq!(comma_list::join(&[]), "");
        assert!(comma_list::split("").is_empty());
    }

    #[test]
    fn test_comma_list_keeps_whitespace() {
        let items = comma_list::split("TR-1, TR-2");
        assert_eq!(items, vec!["TR-1".to_string(), " TR-2".to_string()]);
        assert_eq!(comma_list::join(&items), "TR-1, TR-2");
    }

    #[test]
    fn test_comma_list_serde() {
        let value = serde_json::to_value(Defects {
            defects: vec!["BUG-7".into(), "BUG-9".into()],
        })
        .unwrap();
        assert_eq!(value, json!({"defects": "BUG-7,BUG-9"}));

        let decoded: Defects = serde_json::from_value(json!({"defects": null})).unwrap();
        assert!(decoded.defects.is_empty());

        let decoded: Defects = serde_json::from_value(json!({})).unwrap();
        assert!(decoded.defects.is_empty());
    }

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(with = "int_bool")]
        value: bool,
    }

    #[test]
    fn test_int_bool_accepts_ints_and_bools() {
        let on: Flag = serde_json::from_value(json!({"value": 1})).unwrap();
        let off: Flag = serde_json::from_value(json!({"value": 0})).unwrap();
        let literal: Flag = serde_json::from_value(json!({"value": true})).unwrap();
        assert!(on.value);
        assert!(!off.value);
        assert!(literal.value);
        assert!(serde_json::from_value::<Flag>(json!({"value": "yes"})).is_err());

        let text_on: Flag = serde_json::from_value(json!({"value": "1"})).unwrap();
        let text_off: Flag = serde_json::from_value(json!({"value": "0"})).unwrap();
        let blank: Flag = serde_json::from_value(json!({"value": ""})).unwrap();
        assert!(text_on.value);
        assert!(!text_off.value);
        assert!(!blank.value);
    }

    #[derive(Debug, Deserialize)]
    struct Rows {
        #[serde(default, with = "int_or_string")]
        rows: Option<u32>,
    }

    #[test]
    fn test_int_or_string_accepts_numeric_strings() {
        let numeric: Rows = serde_json::from_value(json!({"rows": 7})).unwrap();
        let text: Rows = serde_json::from_value(json!({"rows": "5"})).unwrap();
        let blank: Rows = serde_json::from_value(json!({"rows": ""})).unwrap();
        let missing: Rows = serde_json::from_value(json!({})).unwrap();
        assert_eq!(numeric.rows, Some(7));
        assert_eq!(text.rows, Some(5));
        assert_eq!(blank.rows, None);
        assert_eq!(missing.rows, None);
        assert!(serde_json::from_value::<Rows>(json!({"rows": "many"})).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct DefaultValue {
        #[serde(default, with = "lenient_int")]
        default_value: Option<i64>,
    }

    #[test]
    fn test_lenient_int_accepts_strings() {
        let numeric: DefaultValue = serde_json::from_value(json!({"default_value": -4})).unwrap();
        let text: DefaultValue = serde_json::from_value(json!({"default_value": "3"})).unwrap();
        let blank: DefaultValue = serde_json::from_value(json!({"default_value": ""})).unwrap();
        let null: DefaultValue = serde_json::from_value(json!({"default_value": null})).unwrap();
        assert_eq!(numeric.default_value, Some(-4));
        assert_eq!(text.default_value, Some(3));
        assert_eq!(blank.default_value, None);
        assert_eq!(null.default_value, None);
        assert!(serde_json::from_value::<DefaultValue>(json!({"default_value": "x"})).is_err());
    }

    #[test]
    fn test_option_items_parse() {
        let items = option_items::parse("1, Low\n2, Medium\n\n3, High, really");
        assert_eq!(
            items,
            vec![
                ("1".to_string(), "Low".to_string()),
                ("2".to_string(), "Medium".to_string()),
                ("3".to_string(), "High, really".to_string()),
            ]
        );
        assert_eq!(
            option_items::format(&items),
            "1, Low\n2, Medium\n3, High, really"
        );
    }
}
