use chrono::{SubsecRound, TimeZone, Utc};
use serde_json::json;
use testrail_model::prelude::*;

#[test]
fn test_custom_field_add_then_get_with_and_without_prefix() {
    let mut case = Case::new("Login");
    case.add_custom_field("custom_foo", 7).add_custom_field("bar", "x");

    assert_eq!(case.custom_field::<i64>("foo").unwrap(), 7);
    assert_eq!(case.custom_field::<String>("bar").unwrap(), "x");
    assert_eq!(case.custom_fields().get_raw("custom_foo"), Some(&json!(7)));
    assert!(case.custom_fields().iter().all(|(key, _)| !key.starts_with("custom_")));
}

#[test]
fn test_missing_custom_field_on_fresh_record() {
    let test = Test::default();
    assert!(test.custom_fields().is_empty());
    let err = test.custom_field::<String>("anything").unwrap_err();
    assert!(matches!(err, ModelError::MissingCustomField { .. }));
}

#[test]
fn test_case_round_trip_preserves_fixed_and_custom_fields() {
    let mut case = Case::new("Checkout")
        .with_type_id(1)
        .with_priority_id(4)
        .with_refs("RF-1")
        .with_custom_field("preconds", "Cart is full")
        .with_custom_field("automated", true)
        .with_custom_field("steps_separated", vec![json!({"content": "Pay"})]);
    case.id = 12;
    case.section_id = 3;
    case.created_on = Some(Utc.timestamp_opt(1_393_586_511, 0).unwrap());

    let encoded = serde_json::to_string(&case).unwrap();
    let decoded: Case = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, case);
}

#[test]
fn test_unknown_members_are_dropped_and_prefixed_ones_kept() {
    let test: Test =
        serde_json::from_value(json!({"id": 1, "custom_foo": 1, "unknown_bar": 2})).unwrap();
    assert_eq!(test.custom_fields().len(), 1);
    assert_eq!(test.custom_field::<i64>("foo").unwrap(), 1);
    assert!(!test.custom_fields().contains_key("unknown_bar"));
}

#[test]
fn test_timestamps_round_trip_at_second_precision() {
    let instant = Utc
        .timestamp_opt(1_700_000_000, 987_654_321)
        .unwrap();
    let milestone = Milestone::new("GA").with_due_on(instant);

    let encoded = serde_json::to_value(&milestone).unwrap();
    assert_eq!(encoded["due_on"], json!(1_700_000_000));

    let decoded: Milestone = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded.due_on, Some(instant.trunc_subsecs(0)));
}

#[test]
fn test_type_ids_resolve_with_unknown_fallback() {
    assert_eq!(FieldType::from_id(1), FieldType::String);
    assert_eq!(FieldType::from_id(12), FieldType::MultiSelect);
    assert_eq!(FieldType::from_id(-1), FieldType::Unknown);
    assert_eq!(FieldType::from_id(999), FieldType::Unknown);
    for field_type in FieldType::ALL {
        assert_eq!(FieldType::from_id(field_type.id()), field_type);
    }
}

#[test]
fn test_milestone_is_completed_only_under_update() {
    let milestone = Milestone::new("Sprint 4").completed(true);

    let update = milestone.to_payload(Operation::MilestonesUpdate).unwrap();
    assert_eq!(update["is_completed"], json!(true));

    for operation in Operation::ALL {
        if operation == Operation::MilestonesUpdate {
            continue;
        }
        let payload = milestone.to_payload(operation).unwrap();
        assert!(
            payload.get("is_completed").is_none(),
            "is_completed leaked into {operation}"
        );
    }
}

#[test]
fn test_result_list_for_cases_keeps_case_ids() {
    let mut failed = TestResult::for_case(2, 5).with_comment("Broken");
    failed.add_defect("TR-7").unwrap();
    let list = TestResultList::from(vec![
        TestResult::for_case(1, 1).with_custom_field("browser", "firefox"),
        failed,
    ]);

    let payload = list.to_payload(Operation::ResultsAddListForCases).unwrap();
    assert_eq!(
        payload,
        json!({
            "results": [
                {"case_id": 1, "status_id": 1, "custom_browser": "firefox"},
                {"case_id": 2, "status_id": 5, "comment": "Broken", "defects": "TR-7"}
            ]
        })
    );

    let by_test = list.to_payload(Operation::ResultsAddList).unwrap();
    assert!(by_test["results"][0].get("case_id").is_none());
}

#[test]
fn test_field_descriptor_decodes_typed_options() {
    let fields: Vec<Field> = serde_json::from_value(json!([
        {
            "id": 1,
            "label": "Automation",
            "name": "automation",
            "system_name": "custom_automation",
            "type_id": 6,
            "display_order": 1,
            "configs": [{
                "id": "a1",
                "context": {"is_global": false, "project_ids": [2]},
                "options": {"is_required": true, "default_value": "1", "items": "1, None\n2, Ranorex"}
            }]
        },
        {
            "id": 2,
            "system_name": "custom_legacy",
            "type_id": 42,
            "configs": [{"context": {"is_global": true}, "options": {"is_required": false}}]
        }
    ]))
    .unwrap();

    let dropdown = &fields[0];
    assert_eq!(dropdown.field_type(), FieldType::Dropdown);
    assert_eq!(dropdown.custom_field_key(), Some("automation"));
    assert!(dropdown.config_for_project(1).is_none());
    let config = dropdown.config_for_project(2).unwrap();
    assert!(config.options.is_required());
    assert_eq!(
        config.options.items(),
        &[
            ("1".to_string(), "None".to_string()),
            ("2".to_string(), "Ranorex".to_string())
        ]
    );

    let legacy = &fields[1];
    assert_eq!(legacy.field_type(), FieldType::Unknown);
    assert!(legacy.config_for_project(99).is_some());
}

#[test]
fn test_service_error_from_response_body() {
    let err = ServiceError::from_response(400, r#"{"error": "Field :title is required"}"#).unwrap();
    assert_eq!(err.to_string(), "400 - Field :title is required");

    let model_err: ModelError = err.into();
    assert!(matches!(model_err, ModelError::Service(_)));
}
