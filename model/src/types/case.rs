use crate::custom::{CustomFields, ExtensibleRecord};
use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const WRITABLE: &[Operation] = &[Operation::CasesAdd, Operation::CasesUpdate];

static CASE_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("title", WRITABLE),
        FieldView::new("template_id", WRITABLE),
        FieldView::new("section_id", &[]),
        FieldView::new("type_id", WRITABLE),
        FieldView::new("priority_id", WRITABLE),
        FieldView::new("milestone_id", WRITABLE),
        FieldView::new("refs", WRITABLE),
        FieldView::new("created_by", &[]),
        FieldView::new("created_on", &[]),
        FieldView::new("updated_by", &[]),
        FieldView::new("updated_on", &[]),
        FieldView::new("estimate", WRITABLE),
        FieldView::new("estimate_forecast", &[]),
        FieldView::new("suite_id", &[]),
    ],
    custom_fields: WRITABLE,
    base: None,
};

/// A test case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Case {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,
    pub section_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,
    pub created_by: u64,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    pub updated_by: u64,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_forecast: Option<String>,
    pub suite_id: u64,
    #[serde(flatten)]
    pub custom_fields: CustomFields,
}

impl Case {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_type_id(mut self, type_id: u64) -> Self {
        self.type_id = Some(type_id);
        self
    }

    pub fn with_priority_id(mut self, priority_id: u64) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    pub fn with_template_id(mut self, template_id: u64) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn with_milestone_id(mut self, milestone_id: u64) -> Self {
        self.milestone_id = Some(milestone_id);
        self
    }

    pub fn with_refs(mut self, refs: impl Into<String>) -> Self {
        self.refs = Some(refs.into());
        self
    }

    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }
}

impl ExtensibleRecord for Case {
    fn custom_fields(&self) -> &CustomFields {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut CustomFields {
        &mut self.custom_fields
    }
}

impl ViewScoped for Case {
    fn view_table() -> &'static ViewTable {
        &CASE_VIEWS
    }
}
