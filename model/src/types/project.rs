use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const EDITABLE: &[Operation] = &[Operation::ProjectsAdd, Operation::ProjectsUpdate];

static PROJECT_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("name", EDITABLE),
        FieldView::new("announcement", EDITABLE),
        FieldView::new("show_announcement", EDITABLE),
        FieldView::new("is_completed", &[Operation::ProjectsUpdate]),
        FieldView::new("completed_on", &[]),
        FieldView::new("url", &[]),
        FieldView::new("suite_mode", EDITABLE),
    ],
    custom_fields: &[],
    base: None,
};

/// Suite layout of a project.
pub mod suite_mode {
    pub const SINGLE: u8 = 1;
    pub const SINGLE_WITH_BASELINES: u8 = 2;
    pub const MULTIPLE: u8 = 3;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_announcement: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_mode: Option<u8>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_announcement(mut self, announcement: impl Into<String>) -> Self {
        self.announcement = Some(announcement.into());
        self.show_announcement = Some(true);
        self
    }

    pub fn with_suite_mode(mut self, suite_mode: u8) -> Self {
        self.suite_mode = Some(suite_mode);
        self
    }
}

impl ViewScoped for Project {
    fn view_table() -> &'static ViewTable {
        &PROJECT_VIEWS
    }
}
