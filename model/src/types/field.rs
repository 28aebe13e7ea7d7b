//! Custom field descriptors (`get_case_fields` / `get_result_fields`).

use crate::convert::{int_bool, int_or_string, lenient_int, option_items};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// TestRail type of a custom field, indexed by the service's `type_id`.
///
/// Custom field values follow this convention (nothing enforces it):
///
/// | Type | Value |
/// |---|---|
/// | String, Text, Url, Dropdown, Date | `String` |
/// | Integer, User, Milestone | integer |
/// | Checkbox | `bool` |
/// | Steps | `Vec<Step>` |
/// | StepResults | `Vec<StepResult>` |
/// | MultiSelect | `Vec<String>` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Unknown,
    String,
    Integer,
    Text,
    Url,
    Checkbox,
    Dropdown,
    User,
    Date,
    Milestone,
    Steps,
    StepResults,
    MultiSelect,
}

impl FieldType {
    /// Position equals the service's type id; 0 is never sent.
    pub const ALL: [FieldType; 13] = [
        FieldType::Unknown,
        FieldType::String,
        FieldType::Integer,
        FieldType::Text,
        FieldType::Url,
        FieldType::Checkbox,
        FieldType::Dropdown,
        FieldType::User,
        FieldType::Date,
        FieldType::Milestone,
        FieldType::Steps,
        FieldType::StepResults,
        FieldType::MultiSelect,
    ];

    /// Resolves a type id. Ids this crate does not know map to `Unknown`.
    pub fn from_id(type_id: i64) -> Self {
        let resolved = usize::try_from(type_id)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or(FieldType::Unknown);
        if resolved == FieldType::Unknown {
            debug!(type_id, "unrecognized custom field type id");
        }
        resolved
    }

    pub fn id(&self) -> i64 {
        *self as i64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Unknown => "unknown",
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Text => "text",
            FieldType::Url => "url",
            FieldType::Checkbox => "checkbox",
            FieldType::Dropdown => "dropdown",
            FieldType::User => "user",
            FieldType::Date => "date",
            FieldType::Milestone => "milestone",
            FieldType::Steps => "steps",
            FieldType::StepResults => "step_results",
            FieldType::MultiSelect => "multi_select",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options shared by every field type. Option keys not modeled by the
/// type-specific struct land in `unknown`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseOptions {
    pub is_required: bool,
    #[serde(flatten)]
    pub unknown: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegerOptions {
    #[serde(with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<i64>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(with = "int_or_string", skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxOptions {
    #[serde(with = "int_bool")]
    pub default_value: bool,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(with = "option_items", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<(String, String)>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOptions {
    #[serde(with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<i64>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub has_expected: bool,
    #[serde(with = "int_or_string", skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepResultsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub has_expected: bool,
    pub has_actual: bool,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSelectOptions {
    #[serde(with = "option_items", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<(String, String)>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

/// Options of one field configuration; the variant follows the field's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldOptions {
    Unknown(BaseOptions),
    String(StringOptions),
    Integer(IntegerOptions),
    Text(TextOptions),
    Url(UrlOptions),
    Checkbox(CheckboxOptions),
    Dropdown(DropdownOptions),
    User(UserOptions),
    Date(BaseOptions),
    Milestone(BaseOptions),
    Steps(StepsOptions),
    StepResults(StepResultsOptions),
    MultiSelect(MultiSelectOptions),
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self::Unknown(BaseOptions::default())
    }
}

impl FieldOptions {
    pub fn from_value(field_type: FieldType, value: Value) -> serde_json::Result<Self> {
        let value = match value {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(match field_type {
            FieldType::Unknown => Self::Unknown(serde_json::from_value(value)?),
            FieldType::String => Self::String(serde_json::from_value(value)?),
            FieldType::Integer => Self::Integer(serde_json::from_value(value)?),
            FieldType::Text => Self::Text(serde_json::from_value(value)?),
            FieldType::Url => Self::Url(serde_json::from_value(value)?),
            FieldType::Checkbox => Self::Checkbox(serde_json::from_value(value)?),
            FieldType::Dropdown => Self::Dropdown(serde_json::from_value(value)?),
            FieldType::User => Self::User(serde_json::from_value(value)?),
            FieldType::Date => Self::Date(serde_json::from_value(value)?),
            FieldType::Milestone => Self::Milestone(serde_json::from_value(value)?),
            FieldType::Steps => Self::Steps(serde_json::from_value(value)?),
            FieldType::StepResults => Self::StepResults(serde_json::from_value(value)?),
            FieldType::MultiSelect => Self::MultiSelect(serde_json::from_value(value)?),
        })
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Unknown(_) => FieldType::Unknown,
            Self::String(_) => FieldType::String,
            Self::Integer(_) => FieldType::Integer,
            Self::Text(_) => FieldType::Text,
            Self::Url(_) => FieldType::Url,
            Self::Checkbox(_) => FieldType::Checkbox,
            Self::Dropdown(_) => FieldType::Dropdown,
            Self::User(_) => FieldType::User,
            Self::Date(_) => FieldType::Date,
            Self::Milestone(_) => FieldType::Milestone,
            Self::Steps(_) => FieldType::Steps,
            Self::StepResults(_) => FieldType::StepResults,
            Self::MultiSelect(_) => FieldType::MultiSelect,
        }
    }

    pub fn base(&self) -> &BaseOptions {
        match self {
            Self::Unknown(base) | Self::Date(base) | Self::Milestone(base) => base,
            Self::String(options) => &options.base,
            Self::Integer(options) => &options.base,
            Self::Text(options) => &options.base,
            Self::Url(options) => &options.base,
            Self::Checkbox(options) => &options.base,
            Self::Dropdown(options) => &options.base,
            Self::User(options) => &options.base,
            Self::Steps(options) => &options.base,
            Self::StepResults(options) => &options.base,
            Self::MultiSelect(options) => &options.base,
        }
    }

    pub fn is_required(&self) -> bool {
        self.base().is_required
    }

    /// Choices of a dropdown or multi-select field.
    pub fn items(&self) -> &[(String, String)] {
        match self {
            Self::Dropdown(options) => &options.items,
            Self::MultiSelect(options) => &options.items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldContext {
    pub is_global: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<u64>>,
}

impl FieldContext {
    pub fn applies_to(&self, project_id: u64) -> bool {
        self.is_global
            || self
                .project_ids
                .as_ref()
                .is_some_and(|ids| ids.contains(&project_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub context: FieldContext,
    pub options: FieldOptions,
}

/// A custom field descriptor. Decoding picks the options variant of every
/// config from `type_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    pub type_id: i64,
    pub display_order: u32,
    pub configs: Vec<FieldConfig>,
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        FieldType::from_id(self.type_id)
    }

    /// The configuration in effect for `project_id`, if any.
    pub fn config_for_project(&self, project_id: u64) -> Option<&FieldConfig> {
        self.configs
            .iter()
            .find(|config| config.context.applies_to(project_id))
    }

    /// System name without the `custom_` prefix, i.e. the key records use.
    pub fn custom_field_key(&self) -> Option<&str> {
        self.system_name.as_deref().map(crate::custom::strip_prefix)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    id: Option<String>,
    context: FieldContext,
    options: Value,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawField {
    id: u64,
    label: Option<String>,
    name: Option<String>,
    description: Option<String>,
    system_name: Option<String>,
    type_id: i64,
    display_order: u32,
    configs: Vec<RawConfig>,
}

impl TryFrom<RawField> for Field {
    type Error = serde_json::Error;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let field_type = FieldType::from_id(raw.type_id);
        let configs = raw
            .configs
            .into_iter()
            .map(|config| {
                Ok(FieldConfig {
                    id: config.id,
                    context: config.context,
                    options: FieldOptions::from_value(field_type, config.options)?,
                })
            })
            .collect::<serde_json::Result<Vec<_>>>()?;

        Ok(Field {
            id: raw.id,
            label: raw.label,
            name: raw.name,
            description: raw.description,
            system_name: raw.system_name,
            type_id: raw.type_id,
            display_order: raw.display_order,
            configs,
        })
    }
}

/// Value of one step in a `Steps` custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl Step {
    pub fn new(content: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            expected: Some(expected.into()),
        }
    }
}

/// Value of one step in a `StepResults` custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
}

fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

impl From<Step> for Value {
    fn from(step: Step) -> Self {
        let mut map = Map::new();
        insert_some(&mut map, "content", step.content.map(Value::from));
        insert_some(&mut map, "expected", step.expected.map(Value::from));
        Value::Object(map)
    }
}

impl From<StepResult> for Value {
    fn from(step: StepResult) -> Self {
        let mut map = Map::new();
        insert_some(&mut map, "content", step.content.map(Value::from));
        insert_some(&mut map, "expected", step.expected.map(Value::from));
        insert_some(&mut map, "actual", step.actual.map(Value::from));
        insert_some(&mut map, "status_id", step.status_id.map(Value::from));
        Value::Object(map)
    }
}
