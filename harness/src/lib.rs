//! Command implementations behind the `testrail-harness` binary. Each returns
//! the text it would print so the commands can be exercised without a
//! process boundary.

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use testrail_model::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("{kind} has no outbound payload")]
    ReadOnly { kind: ResourceKind },
}

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Resource types the `payload` command can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Project,
    Suite,
    Case,
    Test,
    Result,
    Results,
    Run,
    Plan,
    PlanEntry,
    Milestone,
    Template,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_else(|| format!("{self:?}"));
        f.write_str(&name)
    }
}

/// Reads `path`, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> HarnessResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn scoped_payload<T>(input: &str, operation: Operation) -> HarnessResult<serde_json::Value>
where
    T: ViewScoped + DeserializeOwned,
{
    let record: T = serde_json::from_str(input)?;
    Ok(record.to_payload(operation)?)
}

/// Decodes `input` as a `kind` record and renders its body for `operation`.
pub fn payload(kind: ResourceKind, operation: Operation, input: &str) -> HarnessResult<String> {
    let value = match kind {
        ResourceKind::Project => scoped_payload::<Project>(input, operation)?,
        ResourceKind::Suite => scoped_payload::<Suite>(input, operation)?,
        ResourceKind::Case => scoped_payload::<Case>(input, operation)?,
        ResourceKind::Result => scoped_payload::<TestResult>(input, operation)?,
        ResourceKind::Results => scoped_payload::<TestResultList>(input, operation)?,
        ResourceKind::Run => scoped_payload::<Run>(input, operation)?,
        ResourceKind::Plan => scoped_payload::<Plan>(input, operation)?,
        ResourceKind::PlanEntry => scoped_payload::<PlanEntry>(input, operation)?,
        ResourceKind::Milestone => scoped_payload::<Milestone>(input, operation)?,
        ResourceKind::Test | ResourceKind::Template => {
            return Err(HarnessError::ReadOnly { kind });
        }
    };
    info!(%kind, %operation, "rendered payload");
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn field_type(type_id: i64) -> String {
    let field_type = FieldType::from_id(type_id);
    format!("{type_id} -> {field_type} (id {})", field_type.id())
}

/// One line of the `fields` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub key: String,
    pub field_type: String,
    pub required: bool,
    pub configs: usize,
}

impl FieldSummary {
    fn from_field(field: &Field) -> Self {
        Self {
            key: field
                .custom_field_key()
                .or(field.name.as_deref())
                .unwrap_or("<unnamed>")
                .to_string(),
            field_type: field.field_type().to_string(),
            required: field
                .configs
                .first()
                .is_some_and(|config| config.options.is_required()),
            configs: field.configs.len(),
        }
    }
}

impl std::fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<24} {:<12} required={} configs={}",
            self.key, self.field_type, self.required, self.configs
        )
    }
}

pub fn summarize_fields(input: &str, project_id: Option<u64>) -> HarnessResult<Vec<FieldSummary>> {
    let fields: Vec<Field> = serde_json::from_str(input)?;
    debug!(count = fields.len(), "decoded field descriptors");
    Ok(fields
        .iter()
        .filter(|field| match project_id {
            Some(project_id) => field.config_for_project(project_id).is_some(),
            None => true,
        })
        .map(FieldSummary::from_field)
        .collect())
}

pub fn load_config(path: &Path) -> HarnessResult<TestRailConfig> {
    let text = fs::read_to_string(path)?;
    let config: TestRailConfig = toml::from_str(&text)?;
    config.validate()?;
    info!(endpoint = config.endpoint(), "loaded TestRail config");
    Ok(config)
}

pub fn describe_config(config: &TestRailConfig) -> String {
    let mut lines = vec![
        format!("endpoint: {}", config.endpoint()),
        format!("username: {}", config.username),
        format!("timeout: {}s", config.timeout_secs),
    ];
    if let Some(application_name) = &config.application_name {
        lines.push(format!("application: {application_name}"));
    }
    lines.join("\n")
}
