pub mod case;
pub mod field;
pub mod milestone;
pub mod plan;
pub mod project;
pub mod result;
pub mod run;
pub mod suite;
pub mod template;

pub use case::Case;
pub use field::{
    BaseOptions, CheckboxOptions, DropdownOptions, Field, FieldConfig, FieldContext,
    FieldOptions, FieldType, IntegerOptions, MultiSelectOptions, Step, StepResult,
    StepResultsOptions, StepsOptions, StringOptions, TextOptions, UrlOptions, UserOptions,
};
pub use milestone::Milestone;
pub use plan::{EntryRun, Plan, PlanEntry};
pub use project::{suite_mode, Project};
pub use result::{TestResult, TestResultList};
pub use run::{Run, StatusCounts};
pub use suite::Suite;
pub use template::Template;
pub use test::Test;
