use super::run::{Run, StatusCounts, RUN_VIEWS, STATUS_COUNT_VIEWS};
use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ENTRY_EDITABLE: &[Operation] = &[
    Operation::PlansAdd,
    Operation::PlansAddEntry,
    Operation::PlansUpdateEntry,
];

const ENTRY_CREATE: &[Operation] = &[Operation::PlansAdd, Operation::PlansAddEntry];

static ENTRY_RUN_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("entry_id", &[]),
        FieldView::new("entry_index", &[]),
    ],
    custom_fields: &[],
    base: Some(&RUN_VIEWS),
};

static ENTRY_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("name", ENTRY_EDITABLE),
        FieldView::new("suite_id", ENTRY_CREATE),
        FieldView::new("assignedto_id", ENTRY_EDITABLE),
        FieldView::new("include_all", ENTRY_EDITABLE),
        FieldView::new("case_ids", ENTRY_EDITABLE),
        FieldView::new("config_ids", ENTRY_CREATE),
        FieldView::nested("runs", ENTRY_CREATE, &ENTRY_RUN_VIEWS),
    ],
    custom_fields: &[],
    base: None,
};

static PLAN_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("name", &[Operation::PlansAdd, Operation::PlansUpdate]),
        FieldView::new("description", &[Operation::PlansAdd, Operation::PlansUpdate]),
        FieldView::new("url", &[]),
        FieldView::new("project_id", &[]),
        FieldView::new("milestone_id", &[Operation::PlansAdd, Operation::PlansUpdate]),
        FieldView::new("assignedto_id", &[]),
        FieldView::new("created_on", &[]),
        FieldView::new("created_by", &[]),
        FieldView::new("is_completed", &[]),
        FieldView::new("completed_on", &[]),
        FieldView::nested("entries", &[Operation::PlansAdd], &ENTRY_VIEWS),
    ],
    custom_fields: &[],
    base: Some(&STATUS_COUNT_VIEWS),
};

/// A test plan: a set of entries, each grouping one or more runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub project_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    pub created_by: u64,
    pub is_completed: bool,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub counts: StatusCounts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<PlanEntry>,
}

impl Plan {
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

    pub fn with_milestone_id(mut self, milestone_id: u64) -> Self {
        self.milestone_id = Some(milestone_id);
        self
    }

    pub fn with_entry(mut self, entry: PlanEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

impl ViewScoped for Plan {
    fn view_table() -> &'static ViewTable {
        &PLAN_VIEWS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<EntryRun>,
}

impl PlanEntry {
    pub fn new(suite_id: u64) -> Self {
        Self {
            suite_id: Some(suite_id),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_case_ids(mut self, case_ids: Vec<u64>) -> Self {
        self.include_all = Some(false);
        self.case_ids = Some(case_ids);
        self
    }

    pub fn with_config_ids(mut self, config_ids: Vec<u64>) -> Self {
        self.config_ids = Some(config_ids);
        self
    }

    pub fn with_run(mut self, run: impl Into<EntryRun>) -> Self {
        self.runs.push(run.into());
        self
    }
}

impl ViewScoped for PlanEntry {
    fn view_table() -> &'static ViewTable {
        &ENTRY_VIEWS
    }
}

/// A run inside a plan entry: every run field plus the entry it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryRun {
    #[serde(flatten)]
    pub run: Run,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub entry_index: u32,
}

impl From<Run> for EntryRun {
    fn from(run: Run) -> Self {
        Self {
            run,
            ..Default::default()
        }
    }
}
