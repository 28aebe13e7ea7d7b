use crate::convert::comma_list;
use crate::custom::{CustomFields, ExtensibleRecord};
use crate::error::{ModelError, ModelResult};
use crate::view::{FieldView, Operation, ViewScoped, ViewTable};
use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SUBMITTABLE: &[Operation] = &[
    Operation::ResultsAdd,
    Operation::ResultsAddForCase,
    Operation::ResultsAddList,
    Operation::ResultsAddListForCases,
];

static RESULT_VIEWS: ViewTable = ViewTable {
    fields: &[
        FieldView::new("id", &[]),
        FieldView::new("test_id", &[Operation::ResultsAddList]),
        FieldView::new("case_id", &[Operation::ResultsAddListForCases]),
        FieldView::new("status_id", SUBMITTABLE),
        FieldView::new("created_on", &[]),
        FieldView::new("created_by", &[]),
        FieldView::new("assignedto_id", SUBMITTABLE),
        FieldView::new("comment", SUBMITTABLE),
        FieldView::new("version", SUBMITTABLE),
        FieldView::new("elapsed", SUBMITTABLE),
        FieldView::new("defects", SUBMITTABLE),
    ],
    custom_fields: SUBMITTABLE,
    base: None,
};

static RESULT_LIST_VIEWS: ViewTable = ViewTable {
    fields: &[FieldView::nested(
        "results",
        &[Operation::ResultsAddList, Operation::ResultsAddListForCases],
        &RESULT_VIEWS,
    )],
    custom_fields: &[],
    base: None,
};

/// A result recorded against a test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    pub created_by: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,
    #[serde(with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<String>,
    #[serde(flatten)]
    pub custom_fields: CustomFields,
}

impl TestResult {
    pub fn new(status_id: u64) -> Self {
        Self {
            status_id: Some(status_id),
            ..Default::default()
        }
    }

    pub fn for_test(test_id: u64, status_id: u64) -> Self {
        Self {
            test_id: Some(test_id),
            ..Self::new(status_id)
        }
    }

    pub fn for_case(case_id: u64, status_id: u64) -> Self {
        Self {
            case_id: Some(case_id),
            ..Self::new(status_id)
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_elapsed(mut self, elapsed: impl Into<String>) -> Self {
        self.elapsed = Some(elapsed.into());
        self
    }

    pub fn with_assignedto_id(mut self, assignedto_id: u64) -> Self {
        self.assignedto_id = Some(assignedto_id);
        self
    }

    /// Appends a defect reference. Empty references are rejected.
    pub fn add_defect(&mut self, defect: impl Into<String>) -> ModelResult<&mut Self> {
        let defect = defect.into();
        if defect.is_empty() {
            return Err(ModelError::InvalidArgument {
                message: "defect cannot be empty".to_string(),
            });
        }
        self.defects.push(defect);
        Ok(self)
    }
}

impl ExtensibleRecord for TestResult {
    fn custom_fields(&self) -> &CustomFields {
        &self.custom_fields
    }

    fn custom_fields_mut(&mut self) -> &mut CustomFields {
        &mut self.custom_fields
    }
}

impl ViewScoped for TestResult {
    fn view_table() -> &'static ViewTable {
        &RESULT_VIEWS
    }
}

/// Batch of results, sent under the `results` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResultList {
    pub results: Vec<TestResult>,
}

impl TestResultList {
    pub fn new(results: Vec<TestResult>) -> Self {
        Self { results }
    }
}

impl From<Vec<TestResult>> for TestResultList {
    fn from(results: Vec<TestResult>) -> Self {
        Self::new(results)
    }
}

impl ViewScoped for TestResultList {
    fn view_table() -> &'static ViewTable {
        &RESULT_LIST_VIEWS
    }
}
