//! Round-trip and rejection tests for the definition format.
mod common;
use common::*;
use flowdef::prelude::*;

#[test]
fn test_round_trip_conditionals_definition() {
    let original: Value =
        serde_json::from_str(CONDITIONALS_DEFINITION).expect("fixture is valid JSON");
    let workflow = conditionals_workflow();

    assert_eq!(workflow.to_definition(), original);
}

#[test]
fn test_round_trip_preserves_authored_key_order() {
    let workflow = conditionals_workflow();
    let value = workflow.to_definition();

    let action_names: Vec<&String> = value["actions"]
        .as_object()
        .expect("actions is an object")
        .keys()
        .collect();
    assert_eq!(action_names, ["Condition", "Initialize_variable"]);
}

#[test]
fn test_deserialize_reconstructs_equal_graph() {
    for workflow in [
        conditionals_workflow(),
        linear_workflow(),
        nested_workflow(),
    ] {
        let reparsed = Workflow::from_definition(&workflow.to_definition().to_string())
            .expect("serialized definition parses back");
        assert_eq!(workflow, reparsed);
    }
}

#[test]
fn test_missing_run_after_reads_as_empty() {
    let with_key = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": { "Compose": { "type": "Compose", "runAfter": {} } }
    }"#;
    let without_key = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": { "Compose": { "type": "Compose" } }
    }"#;

    let a = Workflow::from_definition(with_key).expect("explicit empty runAfter parses");
    let b = Workflow::from_definition(without_key).expect("missing runAfter parses");
    assert_eq!(a, b);
}

#[test]
fn test_status_tokens_round_trip_verbatim() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Fetch": { "type": "Http", "runAfter": {} },
            "Publish": { "type": "Compose", "runAfter": { "Fetch": ["SUCCEEDED", "TimedOut"] } }
        }
    }"#;

    let workflow = Workflow::from_definition(definition).expect("definition parses");
    let publish = workflow.find("Publish").expect("Publish exists");
    assert_eq!(
        publish.run_after[0].statuses,
        vec!["SUCCEEDED".to_string(), "TimedOut".to_string()]
    );

    let value = workflow.to_definition();
    assert_eq!(
        value["actions"]["Publish"]["runAfter"]["Fetch"],
        json!(["SUCCEEDED", "TimedOut"])
    );
}

#[test]
fn test_switch_cases_round_trip() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Route": {
                "type": "Switch",
                "expression": "@variables('color')",
                "cases": {
                    "Case_red": {
                        "case": "red",
                        "actions": {
                            "Stop": { "type": "Terminate", "inputs": { "runStatus": "Failed" }, "runAfter": {} }
                        }
                    },
                    "Case_green": {
                        "case": "green",
                        "actions": {}
                    }
                },
                "default": {
                    "actions": {
                        "Note": { "type": "Compose", "inputs": "unknown color", "runAfter": {} }
                    }
                },
                "runAfter": {}
            }
        }
    }"#;
    let original: Value = serde_json::from_str(definition).expect("fixture is valid JSON");

    let workflow = Workflow::from_definition(definition).expect("switch definition parses");
    let route = workflow.find("Route").expect("Route exists");
    let ActionKind::Switch { cases, default } = &route.kind else {
        panic!("Route should be a Switch");
    };
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].name, "Case_red");
    assert_eq!(cases[0].value, Some(json!("red")));
    assert!(default.is_some());

    assert_eq!(workflow.to_definition(), original);
}

#[test]
fn test_preserves_unknown_root_keys() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {},
        "parameters": { "environment": { "type": "String", "defaultValue": "prod" } }
    }"#;
    let original: Value = serde_json::from_str(definition).expect("fixture is valid JSON");

    let workflow = Workflow::from_definition(definition).expect("definition parses");
    assert!(workflow.extra.contains_key("parameters"));
    assert_eq!(workflow.to_definition(), original);
}

#[test]
fn test_rejects_invalid_json() {
    let result = Workflow::from_definition("{ invalid json }");
    assert!(matches!(result, Err(DefinitionError::Json(_))));
}

#[test]
fn test_rejects_unknown_type() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": { "Mystery": { "type": "Teleport", "runAfter": {} } }
    }"#;
    let result = Workflow::from_definition(definition);
    assert!(matches!(
        result,
        Err(DefinitionError::Structural(StructuralError::UnknownKind { .. }))
    ));
}

#[test]
fn test_rejects_zero_and_multiple_triggers() {
    let zero = r#"{ "triggers": {}, "actions": {} }"#;
    assert!(matches!(
        Workflow::from_definition(zero),
        Err(DefinitionError::Structural(StructuralError::MissingTrigger))
    ));

    let two = r#"{
        "triggers": {
            "Every_hour": { "type": "Recurrence" },
            "On_request": { "type": "Request" }
        },
        "actions": {}
    }"#;
    assert!(matches!(
        Workflow::from_definition(two),
        Err(DefinitionError::Structural(StructuralError::MultipleTriggers(2)))
    ));
}

#[test]
fn test_rejects_duplicate_name_across_scope_levels() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Shared": { "type": "Compose", "runAfter": {} },
            "Wrapper": {
                "type": "Scope",
                "actions": {
                    "Shared": { "type": "Compose", "runAfter": {} }
                },
                "runAfter": {}
            }
        }
    }"#;
    let result = Workflow::from_definition(definition);
    assert_eq!(
        result,
        Err(DefinitionError::Structural(StructuralError::DuplicateName(
            "Shared".to_string()
        )))
    );
}

#[test]
fn test_rejects_run_after_on_trigger() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request", "runAfter": {} } },
        "actions": {}
    }"#;
    let result = Workflow::from_definition(definition);
    assert!(matches!(
        result,
        Err(DefinitionError::Structural(StructuralError::TriggerRunAfter(_)))
    ));
}

#[test]
fn test_rejects_dangling_run_after_reference() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Publish": { "type": "Compose", "runAfter": { "Fetch": ["Succeeded"] } }
        }
    }"#;
    let result = Workflow::from_definition(definition);
    assert_eq!(
        result,
        Err(DefinitionError::Structural(StructuralError::DanglingRunAfter {
            node: "Publish".to_string(),
            predecessor: "Fetch".to_string(),
        }))
    );
}

#[test]
fn test_rejects_run_after_cycle() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Ping": { "type": "Compose", "runAfter": { "Pong": ["Succeeded"] } },
            "Pong": { "type": "Compose", "runAfter": { "Ping": ["Succeeded"] } }
        }
    }"#;
    let result = Workflow::from_definition(definition);
    assert!(matches!(
        result,
        Err(DefinitionError::Structural(StructuralError::CycleDetected { .. }))
    ));
}

#[test]
fn test_rejects_non_string_status_tokens() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Fetch": { "type": "Http", "runAfter": {} },
            "Publish": { "type": "Compose", "runAfter": { "Fetch": [1] } }
        }
    }"#;
    let result = Workflow::from_definition(definition);
    assert!(matches!(result, Err(DefinitionError::Malformed { .. })));
}

#[test]
fn test_rejects_cycle_inside_nested_scope() {
    let definition = r#"{
        "triggers": { "Manual": { "type": "Request" } },
        "actions": {
            "Wrapper": {
                "type": "Scope",
                "actions": {
                    "Inner": { "type": "Compose", "runAfter": { "Inner": ["Succeeded"] } }
                },
                "runAfter": {}
            }
        }
    }"#;
    let result = Workflow::from_definition(definition);
    assert!(matches!(
        result,
        Err(DefinitionError::Structural(StructuralError::CycleDetected { .. }))
    ));
}
