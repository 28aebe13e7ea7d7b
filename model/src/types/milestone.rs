use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const EDITABLE: &[Operation] = &[Operation::MilestonesAdd, Operation::MilestonesUpdate];

static MILESTONE_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("name", EDITABLE),
        FieldView::new("description", EDITABLE),
        FieldView::new("project_id", &[]),
        FieldView::new("due_on", EDITABLE),
        FieldView::new("is_completed", &[Operation::MilestonesUpdate]),
        FieldView::new("completed_on", &[]),
        FieldView::new("url", &[]),
        FieldView::new("is_started", &[Operation::MilestonesUpdate]),
        FieldView::new("milestones", &[]),
        FieldView::new("parent_id", EDITABLE),
        FieldView::new("start_on", EDITABLE),
        FieldView::new("started_on", &[]),
    ],
    custom_fields: &[],
    base: None,
};

/// A milestone, possibly with sub-milestones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: u64,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_started: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_on: Option<DateTime<Utc>>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub started_on: Option<DateTime<Utc>>,
}

impl Milestone {
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

    pub fn with_due_on(mut self, due_on: DateTime<Utc>) -> Self {
        self.due_on = Some(due_on);
        self
    }

    pub fn with_start_on(mut self, start_on: DateTime<Utc>) -> Self {
        self.start_on = Some(start_on);
        self
    }

    pub fn with_parent_id(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    pub fn started(mut self, is_started: bool) -> Self {
        self.is_started = Some(is_started);
        self
    }
}

impl ViewScoped for Milestone {
    fn view_table() -> &'static ViewTable {
        &MILESTONE_VIEWS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_completion_flags_only_on_update() {
        let due = Utc.timestamp_opt(1_391_968_184, 0).unwrap();
        let milestone = Milestone::new("Release 1.0")
            .with_due_on(due)
            .completed(true)
            .started(true);

        let add = milestone.to_payload(Operation::MilestonesAdd).unwrap();
        assert_eq!(add, json!({"name": "Release 1.0", "due_on": 1_391_968_184}));

        let update = milestone.to_payload(Operation::MilestonesUpdate).unwrap();
        assert_eq!(
            update,
            json!({
                "name": "Release 1.0",
                "due_on": 1_391_968_184,
                "is_completed": true,
                "is_started": true
            })
        );
    }

    #[test]
    fn test_decodes_sub_milestones() {
        let milestone: Milestone = serde_json::from_value(json!({
            "id": 1,
            "name": "Release 1.5",
            "project_id": 1,
            "is_completed": false,
            "is_started": true,
            "started_on": 1_389_968_184,
            "milestones": [
                {"id": 2, "name": "Sprint 1", "parent_id": 1, "is_completed": true}
            ]
        }))
        .unwrap();

        assert_eq!(milestone.is_completed, Some(false));
        assert_eq!(milestone.milestones.len(), 1);
        assert_eq!(milestone.milestones[0].parent_id, Some(1));
        assert_eq!(
            milestone.started_on,
            Some(Utc.timestamp_opt(1_389_968_184, 0).unwrap())
        );

        let payload = milestone.to_payload(Operation::MilestonesAdd).unwrap();
        assert_eq!(payload, json!({"name": "Release 1.5"}));
    }
}
