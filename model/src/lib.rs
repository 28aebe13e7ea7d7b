//! Typed resource model for the TestRail REST API.
//!
//! Records decode from service responses, carry project-defined custom fields
//! next to their fixed ones, and encode into per-operation payloads through
//! [`ViewScoped::to_payload`].

pub mod config;
pub mod convert;
pub mod custom;
pub mod error;
pub mod types;
pub mod view;

pub use config::TestRailConfig;
pub use custom::{CustomFields, ExtensibleRecord, CUSTOM_FIELD_KEY_PREFIX};
pub use error::{ModelError, ModelResult, ServiceError, ServiceErrorBuilder};
pub use types::{
    Case, EntryRun, Field, FieldConfig, FieldContext, FieldOptions, FieldType, Milestone, Plan,
    PlanEntry, Project, Run, StatusCounts, Step, StepResult, Suite, Template, Test, TestResult,
    TestResultList,
};
pub use view::{FieldView, Operation, ViewScoped, ViewTable};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::custom::*;
    pub use crate::error::*;
    pub use crate::types::*;
    pub use crate::view::*;
}
