use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) static STATUS_COUNT_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("passed_count", &[]),
        FieldView::new("blocked_count", &[]),
        FieldView::new("untested_count", &[]),
        FieldView::new("retest_count", &[]),
        FieldView::new("failed_count", &[]),
        FieldView::new("custom_status1_count", &[]),
        FieldView::new("custom_status2_count", &[]),
        FieldView::new("custom_status3_count", &[]),
        FieldView::new("custom_status4_count", &[]),
        FieldView::new("custom_status5_count", &[]),
        FieldView::new("custom_status6_count", &[]),
        FieldView::new("custom_status7_count", &[]),
    ],
    custom_fields: &[],
    base: None,
};

pub(crate) static RUN_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("name", &[Operation::RunsAdd, Operation::RunsUpdate]),
        FieldView::new("description", &[Operation::RunsAdd, Operation::RunsUpdate]),
        FieldView::new("url", &[]),
        FieldView::new("project_id", &[]),
        FieldView::new("plan_id", &[]),
        FieldView::new("suite_id", &[Operation::RunsAdd]),
        FieldView::new("milestone_id", &[Operation::RunsAdd, Operation::RunsUpdate]),
        FieldView::new(
            "assignedto_id",
            &[
                Operation::RunsAdd,
                Operation::PlansAdd,
                Operation::PlansAddEntry,
            ],
        ),
        FieldView::new(
            "include_all",
            &[
                Operation::RunsAdd,
                Operation::RunsUpdate,
                Operation::PlansAdd,
                Operation::PlansAddEntry,
            ],
        ),
        FieldView::new(
            "case_ids",
            &[
                Operation::RunsAdd,
                Operation::RunsUpdate,
                Operation::PlansAdd,
                Operation::PlansAddEntry,
            ],
        ),
        FieldView::new("created_on", &[]),
        FieldView::new("created_by", &[]),
        FieldView::new("is_completed", &[]),
        FieldView::new("completed_on", &[]),
        FieldView::new("config", &[]),
        FieldView::new(
            "config_ids",
            &[Operation::PlansAdd, Operation::PlansAddEntry],
        ),
    ],
    custom_fields: &[],
    base: Some(&STATUS_COUNT_VIEWS),
};

/// Per-status test counts reported on runs and plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCounts {
    pub passed_count: u32,
    pub blocked_count: u32,
    pub untested_count: u32,
    pub retest_count: u32,
    pub failed_count: u32,
    pub custom_status1_count: u32,
    pub custom_status2_count: u32,
    pub custom_status3_count: u32,
    pub custom_status4_count: u32,
    pub custom_status5_count: u32,
    pub custom_status6_count: u32,
    pub custom_status7_count: u32,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        [
            self.passed_count,
            self.blocked_count,
            self.untested_count,
            self.retest_count,
            self.failed_count,
            self.custom_status1_count,
            self.custom_status2_count,
            self.custom_status3_count,
            self.custom_status4_count,
            self.custom_status5_count,
            self.custom_status6_count,
            self.custom_status7_count,
        ]
        .into_iter()
        .map(u64::from)
        .sum()
    }
}

/// A test run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub project_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_ids: Option<Vec<u64>>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    pub created_by: u64,
    pub is_completed: bool,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_ids: Option<Vec<u64>>,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

impl Run {
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

    pub fn with_suite_id(mut self, suite_id: u64) -> Self {
        self.suite_id = Some(suite_id);
        self
    }

    pub fn with_milestone_id(mut self, milestone_id: u64) -> Self {
        self.milestone_id = Some(milestone_id);
        self
    }

    pub fn with_assignedto_id(mut self, assignedto_id: u64) -> Self {
        self.assignedto_id = Some(assignedto_id);
        self
    }

    /// Restricts the run to `case_ids` (sets `include_all` to false).
    pub fn with_case_ids(mut self, case_ids: Vec<u64>) -> Self {
        self.include_all = Some(false);
        self.case_ids = Some(case_ids);
        self
    }

    pub fn with_config_ids(mut self, config_ids: Vec<u64>) -> Self {
        self.config_ids = Some(config_ids);
        self
    }
}

impl ViewScoped for Run {
    fn view_table() -> &'static ViewTable {
        &RUN_VIEWS
    }
}
