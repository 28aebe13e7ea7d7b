//! Outbound views.
//!
//! A record serializes fully when read back or logged, but each API call only
//! accepts a subset of its members. Every resource type owns a static
//! [`ViewTable`] naming, per wire field, the [`Operation`]s that may send it;
//! [`ViewScoped::to_payload`] filters the serialized record through it.

use crate::custom::CUSTOM_FIELD_KEY_PREFIX;
use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ProjectsAdd,
    ProjectsUpdate,
    SuitesAdd,
    SuitesUpdate,
    CasesAdd,
    CasesUpdate,
    MilestonesAdd,
    MilestonesUpdate,
    RunsAdd,
    RunsUpdate,
    PlansAdd,
    PlansUpdate,
    PlansAddEntry,
    PlansUpdateEntry,
    ResultsAdd,
    ResultsAddForCase,
    ResultsAddList,
    ResultsAddListForCases,
}

impl Operation {
    pub const ALL: [Operation; 18] = [
        Operation::ProjectsAdd,
        Operation::ProjectsUpdate,
        Operation::SuitesAdd,
        Operation::SuitesUpdate,
        Operation::CasesAdd,
        Operation::CasesUpdate,
        Operation::MilestonesAdd,
        Operation::MilestonesUpdate,
        Operation::RunsAdd,
        Operation::RunsUpdate,
        Operation::PlansAdd,
        Operation::PlansUpdate,
        Operation::PlansAddEntry,
        Operation::PlansUpdateEntry,
        Operation::ResultsAdd,
        Operation::ResultsAddForCase,
        Operation::ResultsAddList,
        Operation::ResultsAddListForCases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ProjectsAdd => "projects.add",
            Operation::ProjectsUpdate => "projects.update",
            Operation::SuitesAdd => "suites.add",
            Operation::SuitesUpdate => "suites.update",
            Operation::CasesAdd => "cases.add",
            Operation::CasesUpdate => "cases.update",
            Operation::MilestonesAdd => "milestones.add",
            Operation::MilestonesUpdate => "milestones.update",
            Operation::RunsAdd => "runs.add",
            Operation::RunsUpdate => "runs.update",
            Operation::PlansAdd => "plans.add",
            Operation::PlansUpdate => "plans.update",
            Operation::PlansAddEntry => "plans.add_entry",
            Operation::PlansUpdateEntry => "plans.update_entry",
            Operation::ResultsAdd => "results.add",
            Operation::ResultsAddForCase => "results.add_for_case",
            Operation::ResultsAddList => "results.add_list",
            Operation::ResultsAddListForCases => "results.add_list_for_cases",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ModelError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// Visibility of one wire member.
#[derive(Debug)]
pub struct FieldView {
    pub name: &'static str,
    pub operations: &'static [Operation],
    /// Table applied to the member's value (an object, or each object of an
    /// array) once the member itself is kept.
    pub nested: Option<&'static ViewTable>,
}

impl FieldView {
    pub const fn new(name: &'static str, operations: &'static [Operation]) -> Self {
        Self {
            name,
            operations,
            nested: None,
        }
    }

    pub const fn nested(
        name: &'static str,
        operations: &'static [Operation],
        table: &'static ViewTable,
    ) -> Self {
        Self {
            name,
            operations,
            nested: Some(table),
        }
    }
}

/// Per-resource visibility table. Members not listed are never sent, except
/// prefixed custom members, which follow `custom_fields`.
#[derive(Debug)]
pub struct ViewTable {
    pub fields: &'static [FieldView],
    pub custom_fields: &'static [Operation],
    /// Table of an embedded record whose members are flattened into this one.
    pub base: Option<&'static ViewTable>,
}

impl ViewTable {
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .or_else(|| self.base.and_then(|base| base.field(name)))
    }

    fn custom_operations(&self) -> &'static [Operation] {
        match self.base {
            Some(base) if self.custom_fields.is_empty() => base.custom_operations(),
            _ => self.custom_fields,
        }
    }

    pub fn allows(&self, name: &str, operation: Operation) -> bool {
        match self.field(name) {
            Some(field) => field.operations.contains(&operation),
            None => {
                name.starts_with(CUSTOM_FIELD_KEY_PREFIX)
                    && self.custom_operations().contains(&operation)
            }
        }
    }

    /// Drops every member of `object` not visible under `operation`,
    /// recursing into nested tables. Returns the number of dropped members.
    pub fn filter(&self, object: &mut Map<String, Value>, operation: Operation) -> usize {
        let before = object.len();
        object.retain(|name, _| self.allows(name, operation));
        let mut dropped = before - object.len();

        for (name, value) in object.iter_mut() {
            let Some(nested) = self.field(name).and_then(|field| field.nested) else {
                continue;
            };
            match value {
                Value::Object(inner) => dropped += nested.filter(inner, operation),
                Value::Array(items) => {
                    for item in items.iter_mut() {
                        if let Value::Object(inner) = item {
                            dropped += nested.filter(inner, operation);
                        }
                    }
                }
                _ => {}
            }
        }

        dropped
    }
}

/// A record with a static view table.
pub trait ViewScoped: Serialize {
    fn view_table() -> &'static ViewTable;

    /// The JSON body to send for `operation`.
    fn to_payload(&self, operation: Operation) -> ModelResult<Value> {
        let mut value = serde_json::to_value(self)?;
        let Value::Object(object) = &mut value else {
            return Err(ModelError::UnexpectedShape {
                message: format!("{} did not serialize to an object", std::any::type_name::<Self>()),
            });
        };
        let dropped = Self::view_table().filter(object, operation);
        debug!(
            %operation,
            kept = object.len(),
            dropped,
            "built payload for {}",
            std::any::type_name::<Self>()
        );
        Ok(value)
    }

    fn to_payload_string(&self, operation: Operation) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.to_payload(operation)?)?)
    }
}
