use serde_json::{json, Value};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use testrail_harness::{
    describe_config, load_config, payload, read_input, summarize_fields, HarnessError,
    ResourceKind,
};
use testrail_model::{ModelError, Operation};

fn render(kind: ResourceKind, operation: Operation, input: Value) -> Value {
    let text = payload(kind, operation, &input.to_string()).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_case_payload_from_service_response() {
    let response = json!({
        "id": 1,
        "title": "Print document history",
        "section_id": 1,
        "template_id": 1,
        "type_id": 2,
        "priority_id": 2,
        "created_by": 1,
        "created_on": 1_392_300_984,
        "suite_id": 1,
        "custom_automation_type": 0,
        "custom_preconds": null,
        "display_order": 1
    });

    let body = render(ResourceKind::Case, Operation::CasesUpdate, response);
    assert_eq!(
        body,
        json!({
            "title": "Print document history",
            "template_id": 1,
            "type_id": 2,
            "priority_id": 2,
            "custom_automation_type": 0,
            "custom_preconds": null
        })
    );
}

#[test]
fn test_plan_entry_payload_for_add_entry() {
    let entry = json!({
        "suite_id": 1,
        "name": "Browsers",
        "include_all": true,
        "config_ids": [1, 2],
        "runs": [
            {"include_all": false, "case_ids": [1, 2], "config_ids": [1], "entry_index": 1}
        ]
    });

    let add = render(ResourceKind::PlanEntry, Operation::PlansAddEntry, entry.clone());
    assert_eq!(
        add["runs"],
        json!([{"include_all": false, "case_ids": [1, 2], "config_ids": [1]}])
    );

    let update = render(ResourceKind::PlanEntry, Operation::PlansUpdateEntry, entry);
    assert_eq!(update, json!({"name": "Browsers", "include_all": true}));
}

#[test]
fn test_bad_json_is_reported() {
    let err = payload(ResourceKind::Run, Operation::RunsAdd, "{not json").unwrap_err();
    assert!(matches!(err, HarnessError::Json(_)));
}

#[test]
fn test_read_input_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json!({"id": 3, "name": "Smoke"})).unwrap();

    let text = read_input(Some(file.path())).unwrap();
    let body = payload(ResourceKind::Suite, Operation::SuitesAdd, &text).unwrap();
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"name": "Smoke"}));
}

#[test]
fn test_fields_filtered_by_project() {
    let descriptors = json!([
        {
            "id": 1,
            "system_name": "custom_preconds",
            "type_id": 3,
            "configs": [{
                "context": {"is_global": true},
                "options": {"is_required": false, "format": "markdown", "rows": "7"}
            }]
        },
        {
            "id": 2,
            "system_name": "custom_browser",
            "type_id": 12,
            "configs": [{
                "context": {"is_global": false, "project_ids": [5]},
                "options": {"is_required": true, "items": "1, Chrome\n2, Firefox"}
            }]
        }
    ])
    .to_string();

    let all = summarize_fields(&descriptors, None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].key, "preconds");
    assert_eq!(all[0].field_type, "text");
    assert!(all[1].required);

    let scoped = summarize_fields(&descriptors, Some(9)).unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].key, "preconds");
}

#[test]
fn test_check_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testrail.toml");
    std::fs::write(
        &path,
        r#"
endpoint = "https://example.testrail.io/"
username = "qa@example.com"
api_key = "k3y"
application_name = "nightly-sync"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.timeout_secs, 30);
    let summary = describe_config(&config);
    assert!(summary.contains("endpoint: https://example.testrail.io\n"));
    assert!(summary.contains("application: nightly-sync"));
    assert!(!summary.contains("k3y"));
}

#[test]
fn test_check_config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testrail.toml");
    std::fs::write(
        &path,
        "endpoint = \"ftp://example\"\nusername = \"qa\"\napi_key = \"k\"\n",
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Model(ModelError::InvalidConfig { .. })
    ));

    std::fs::write(&path, "endpoint = 3").unwrap();
    assert!(matches!(load_config(&path).unwrap_err(), HarnessError::Toml(_)));
}
