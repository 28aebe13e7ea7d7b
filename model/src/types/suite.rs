use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use serde::{Deserialize, Serialize};

const EDITABLE: &[Operation] = &[Operation::SuitesAdd, Operation::SuitesUpdate];

static SUITE_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("name", EDITABLE),
        FieldView::new("description", EDITABLE),
        FieldView::new("project_id", &[]),
        FieldView::new("is_baseline", &[]),
        FieldView::new("is_completed", &[]),
        FieldView::new("is_master", &[]),
        FieldView::new("url", &[]),
    ],
    custom_fields: &[],
    base: None,
};

/// A test suite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suite {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: u64,
    pub is_baseline: bool,
    pub is_completed: bool,
    pub is_master: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ViewScoped for Suite {
    fn view_table() -> &'static ViewTable {
        &SUITE_VIEWS
    }
}
