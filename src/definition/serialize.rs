//! Projection of the in-memory graph into the definition document.
//!
//! This is a pure, read-only projection. Nodes are emitted in the graph's
//! own insertion order; no topological reordering happens here, because
//! `runAfter` content is the only thing the runtime is allowed to order by.

use serde_json::{Map, Value};

use super::keys;
use crate::graph::node::{ActionKind, Node, Trigger};
use crate::graph::workflow::Workflow;

/// Serializes a workflow into its definition document value.
pub fn to_value(workflow: &Workflow) -> Value {
    let mut root = Map::new();
    if let Some(schema) = &workflow.schema {
        root.insert(keys::SCHEMA.to_string(), Value::String(schema.clone()));
    }
    if let Some(version) = &workflow.content_version {
        root.insert(
            keys::CONTENT_VERSION.to_string(),
            Value::String(version.clone()),
        );
    }

    let mut triggers = Map::new();
    if let Some(trigger) = &workflow.trigger {
        triggers.insert(trigger.name.clone(), trigger_value(trigger));
    }
    root.insert(keys::TRIGGERS.to_string(), Value::Object(triggers));
    root.insert(keys::ACTIONS.to_string(), level_value(&workflow.actions));
    if let Some(outputs) = &workflow.outputs {
        root.insert(keys::OUTPUTS.to_string(), Value::Object(outputs.clone()));
    }
    for (key, value) in &workflow.extra {
        root.insert(key.clone(), value.clone());
    }
    Value::Object(root)
}

/// Compact JSON text of the definition document.
pub fn to_string(workflow: &Workflow) -> String {
    to_value(workflow).to_string()
}

/// Pretty-printed JSON text of the definition document.
pub fn to_string_pretty(workflow: &Workflow) -> String {
    serde_json::to_string_pretty(&to_value(workflow)).unwrap_or_else(|_| to_string(workflow))
}

/// Triggers carry `type` and parameters, never `runAfter`.
fn trigger_value(trigger: &Trigger) -> Value {
    let mut obj = Map::new();
    obj.insert(
        keys::TYPE.to_string(),
        Value::String(trigger.kind.type_name().to_string()),
    );
    for (key, value) in &trigger.parameters {
        obj.insert(key.clone(), value.clone());
    }
    Value::Object(obj)
}

fn level_value(level: &[Node]) -> Value {
    let mut map = Map::new();
    for node in level {
        map.insert(node.name.clone(), node_value(node));
    }
    Value::Object(map)
}

/// Per-node emission order: `type`, parameters as stored, the kind's nested
/// sub-graph keys, `runAfter` last. Actions always carry `runAfter`, even
/// when empty.
fn node_value(node: &Node) -> Value {
    let mut obj = Map::new();
    obj.insert(
        keys::TYPE.to_string(),
        Value::String(node.kind.type_name().to_string()),
    );
    for (key, value) in &node.parameters {
        obj.insert(key.clone(), value.clone());
    }

    match &node.kind {
        ActionKind::If {
            actions,
            else_actions,
        } => {
            obj.insert(keys::ACTIONS.to_string(), level_value(actions));
            if let Some(else_level) = else_actions {
                let mut else_obj = Map::new();
                else_obj.insert(keys::ACTIONS.to_string(), level_value(else_level));
                obj.insert(keys::ELSE.to_string(), Value::Object(else_obj));
            }
        }
        ActionKind::Switch { cases, default } => {
            let mut cases_obj = Map::new();
            for case in cases {
                let mut case_obj = Map::new();
                if let Some(value) = &case.value {
                    case_obj.insert(keys::CASE.to_string(), value.clone());
                }
                case_obj.insert(keys::ACTIONS.to_string(), level_value(&case.actions));
                cases_obj.insert(case.name.clone(), Value::Object(case_obj));
            }
            obj.insert(keys::CASES.to_string(), Value::Object(cases_obj));
            if let Some(default_level) = default {
                let mut default_obj = Map::new();
                default_obj.insert(keys::ACTIONS.to_string(), level_value(default_level));
                obj.insert(keys::DEFAULT.to_string(), Value::Object(default_obj));
            }
        }
        ActionKind::Scope { actions }
        | ActionKind::Foreach { actions }
        | ActionKind::Until { actions } => {
            obj.insert(keys::ACTIONS.to_string(), level_value(actions));
        }
        _ => {}
    }

    let mut run_after = Map::new();
    for entry in &node.run_after {
        run_after.insert(
            entry.predecessor.clone(),
            Value::Array(
                entry
                    .statuses
                    .iter()
                    .map(|s| Value::String(s.clone()))
                    .collect(),
            ),
        );
    }
    obj.insert(keys::RUN_AFTER.to_string(), Value::Object(run_after));
    Value::Object(obj)
}
