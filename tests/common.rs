//! Common test fixtures and builders for workflow graphs.
use flowdef::prelude::*;

/// A monthly-recurrence workflow with one If scope: the true branch
/// terminates successfully, the else branch terminates with an error code.
pub const CONDITIONALS_DEFINITION: &str = r#"{
  "$schema": "https://schema.management.azure.com/providers/Microsoft.Logic/schemas/2016-06-01/workflowdefinition.json#",
  "actions": {
    "Condition": {
      "type": "If",
      "expression": {
        "or": [
          { "equals": ["abc@microsoft.com", "@variables('goalOwner')"] },
          { "equals": ["@null", "@variables('goalOwner')"] },
          { "not": { "equals": ["@true", "@variables('goalOwner')"] } },
          {
            "and": [
              { "not": { "endsWith": ["@{concat(concat(concat(concat())))}", "@variables('goalOwner')"] } },
              { "equals": [null, "@variables('goalOwner')"] }
            ]
          }
        ]
      },
      "actions": {
        "Terminate": {
          "type": "Terminate",
          "inputs": { "runStatus": "Succeeded" },
          "runAfter": {}
        }
      },
      "else": {
        "actions": {
          "Terminate_2": {
            "type": "Terminate",
            "inputs": {
              "runStatus": "Failed",
              "runError": {
                "code": "CreateAndGetGoalFailed",
                "message": "Created goal does not match expected goal"
              }
            },
            "runAfter": {}
          }
        }
      },
      "runAfter": {
        "Initialize_variable": ["Succeeded"]
      }
    },
    "Initialize_variable": {
      "type": "InitializeVariable",
      "inputs": {
        "variables": [
          { "name": "goalOwner", "type": "string", "value": "@null" }
        ]
      },
      "runAfter": {}
    }
  },
  "contentVersion": "1.0.0.0",
  "outputs": {},
  "triggers": {
    "Recurrence": {
      "type": "Recurrence",
      "recurrence": { "frequency": "Month", "interval": 1 }
    }
  }
}"#;

#[allow(dead_code)]
pub fn conditionals_workflow() -> Workflow {
    Workflow::from_definition(CONDITIONALS_DEFINITION)
        .expect("Failed to parse the conditionals fixture")
}

/// Trigger -> First -> Second -> Third, a single linear chain.
#[allow(dead_code)]
pub fn linear_workflow() -> Workflow {
    let first = Node::new("First", ActionKind::InitializeVariable).with_parameter(
        "inputs",
        json!({ "variables": [{ "name": "count", "type": "integer", "value": 0 }] }),
    );
    let second = Node::new("Second", ActionKind::Compose)
        .with_parameter("inputs", json!("@variables('count')"))
        .with_run_after("First", &[status::SUCCEEDED]);
    let third = Node::new("Third", ActionKind::Response)
        .with_parameter("inputs", json!({ "statusCode": 200 }))
        .with_run_after("Second", &[status::SUCCEEDED]);

    Workflow {
        content_version: Some("1.0.0.0".to_string()),
        trigger: Some(Trigger::new("Manual", TriggerKind::Request)),
        actions: vec![first, second, third],
        outputs: Some(Parameters::new()),
        ..Default::default()
    }
}

/// A -> {B, C} -> D, the classic diamond over one level.
#[allow(dead_code)]
pub fn diamond_workflow() -> Workflow {
    let a = Node::new("A", ActionKind::InitializeVariable);
    let b = Node::new("B", ActionKind::Compose).with_run_after("A", &[status::SUCCEEDED]);
    let c = Node::new("C", ActionKind::Compose)
        .with_run_after("A", &[status::SUCCEEDED, status::FAILED]);
    let d = Node::new("D", ActionKind::Response)
        .with_run_after("B", &[status::SUCCEEDED])
        .with_run_after("C", &[status::SKIPPED]);

    Workflow {
        trigger: Some(Trigger::new("Manual", TriggerKind::Request)),
        actions: vec![a, b, c, d],
        ..Default::default()
    }
}

/// Three levels of nesting: a Scope holding an Until holding a Compose.
#[allow(dead_code)]
pub fn nested_workflow() -> Workflow {
    let collect = Node::new("Collect", ActionKind::Compose)
        .with_parameter("inputs", json!("@variables('batch')"));
    let retry_loop = Node::new(
        "Retry_loop",
        ActionKind::Until {
            actions: vec![collect],
        },
    )
    .with_parameter("expression", json!("@equals(variables('done'), true)"))
    .with_parameter("limit", json!({ "count": 5 }));
    let batch_scope = Node::new(
        "Batch_scope",
        ActionKind::Scope {
            actions: vec![retry_loop],
        },
    )
    .with_run_after("Initialize_done", &[status::SUCCEEDED]);
    let initialize = Node::new("Initialize_done", ActionKind::InitializeVariable).with_parameter(
        "inputs",
        json!({ "variables": [{ "name": "done", "type": "boolean", "value": false }] }),
    );

    Workflow {
        trigger: Some(Trigger::new("Manual", TriggerKind::Request)),
        actions: vec![initialize, batch_scope],
        outputs: Some(Parameters::new()),
        ..Default::default()
    }
}
