//! Parsing of definition documents into the in-memory graph.
//!
//! Construction is fail-fast: the first malformed shape, unknown kind,
//! duplicate name or trigger-cardinality violation aborts the parse. After
//! the tree is built, the dependency resolver re-checks every level, so a
//! definition with a dangling `runAfter` reference or a cycle is rejected
//! rather than silently repaired.

use ahash::AHashSet;
use serde_json::{Map, Value};

use super::keys;
use crate::error::{DefinitionError, StructuralError};
use crate::graph::node::{
    ActionKind, Node, Parameters, RunAfterEntry, SwitchCase, Trigger, TriggerKind,
};
use crate::graph::resolver;
use crate::graph::workflow::Workflow;

/// Parses a definition document from JSON text.
pub fn parse(json: &str) -> Result<Workflow, DefinitionError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| DefinitionError::Json(e.to_string()))?;
    from_value(&value)
}

/// Builds a workflow graph from an already-parsed definition document.
pub fn from_value(value: &Value) -> Result<Workflow, DefinitionError> {
    let root = expect_object(value, "$")?;
    let mut names = NameRegistry::default();
    let mut workflow = Workflow::new();

    if let Some(v) = root.get(keys::SCHEMA) {
        workflow.schema = Some(expect_string(v, keys::SCHEMA)?);
    }
    if let Some(v) = root.get(keys::CONTENT_VERSION) {
        workflow.content_version = Some(expect_string(v, keys::CONTENT_VERSION)?);
    }

    let trigger_entries = match root.get(keys::TRIGGERS) {
        Some(v) => expect_object(v, keys::TRIGGERS)?,
        None => return Err(StructuralError::MissingTrigger.into()),
    };
    let mut trigger_iter = trigger_entries.iter();
    match (trigger_iter.next(), trigger_iter.next()) {
        (None, _) => return Err(StructuralError::MissingTrigger.into()),
        (Some(_), Some(_)) => {
            return Err(StructuralError::MultipleTriggers(trigger_entries.len()).into());
        }
        (Some((name, entry)), None) => {
            names.claim(name)?;
            workflow.trigger = Some(parse_trigger(name, entry)?);
        }
    }

    if let Some(v) = root.get(keys::ACTIONS) {
        let level = expect_object(v, keys::ACTIONS)?;
        workflow.actions = parse_level(level, keys::ACTIONS, &mut names)?;
    }
    if let Some(v) = root.get(keys::OUTPUTS) {
        workflow.outputs = Some(expect_object(v, keys::OUTPUTS)?.clone());
    }
    for (key, value) in root {
        if !matches!(
            key.as_str(),
            keys::SCHEMA | keys::CONTENT_VERSION | keys::TRIGGERS | keys::ACTIONS | keys::OUTPUTS
        ) {
            workflow.extra.insert(key.clone(), value.clone());
        }
    }

    resolver::validate_level(&workflow.actions)?;
    for node in workflow.iter() {
        for level in node.kind.levels() {
            resolver::validate_level(level)?;
        }
    }

    Ok(workflow)
}

fn parse_trigger(name: &str, value: &Value) -> Result<Trigger, DefinitionError> {
    let context = format!("{}.{}", keys::TRIGGERS, name);
    let obj = expect_object(value, &context)?;
    let type_name = required_type(obj, &context)?;
    let kind = TriggerKind::from_type_name(&type_name).ok_or_else(|| {
        StructuralError::UnknownKind {
            node: name.to_string(),
            type_name: type_name.clone(),
        }
    })?;
    if obj.contains_key(keys::RUN_AFTER) {
        return Err(StructuralError::TriggerRunAfter(name.to_string()).into());
    }

    let mut parameters = Parameters::new();
    for (key, value) in obj {
        if key != keys::TYPE {
            parameters.insert(key.clone(), value.clone());
        }
    }
    Ok(Trigger {
        name: name.to_string(),
        kind,
        parameters,
    })
}

fn parse_level(
    level: &Map<String, Value>,
    context: &str,
    names: &mut NameRegistry,
) -> Result<Vec<Node>, DefinitionError> {
    let mut nodes = Vec::with_capacity(level.len());
    for (name, entry) in level {
        names.claim(name)?;
        nodes.push(parse_node(name, entry, context, names)?);
    }
    Ok(nodes)
}

fn parse_node(
    name: &str,
    value: &Value,
    parent_context: &str,
    names: &mut NameRegistry,
) -> Result<Node, DefinitionError> {
    let context = format!("{}.{}", parent_context, name);
    let obj = expect_object(value, &context)?;
    let type_name = required_type(obj, &context)?;

    // Keys consumed by the kind itself; everything else is a parameter.
    let mut consumed: Vec<&str> = vec![keys::TYPE, keys::RUN_AFTER];

    let kind = match type_name.as_str() {
        "If" => {
            consumed.extend([keys::ACTIONS, keys::ELSE]);
            let actions = nested_level(obj.get(keys::ACTIONS), &context, names)?;
            let else_actions = match obj.get(keys::ELSE) {
                Some(v) => {
                    let else_context = format!("{}.{}", context, keys::ELSE);
                    let else_obj = expect_object(v, &else_context)?;
                    Some(nested_level(
                        else_obj.get(keys::ACTIONS),
                        &else_context,
                        names,
                    )?)
                }
                None => None,
            };
            ActionKind::If {
                actions,
                else_actions,
            }
        }
        "Switch" => {
            consumed.extend([keys::CASES, keys::DEFAULT]);
            let mut cases = Vec::new();
            if let Some(v) = obj.get(keys::CASES) {
                let cases_context = format!("{}.{}", context, keys::CASES);
                for (case_name, case_value) in expect_object(v, &cases_context)? {
                    let case_context = format!("{}.{}", cases_context, case_name);
                    let case_obj = expect_object(case_value, &case_context)?;
                    cases.push(SwitchCase {
                        name: case_name.clone(),
                        value: case_obj.get(keys::CASE).cloned(),
                        actions: nested_level(case_obj.get(keys::ACTIONS), &case_context, names)?,
                    });
                }
            }
            let default = match obj.get(keys::DEFAULT) {
                Some(v) => {
                    let default_context = format!("{}.{}", context, keys::DEFAULT);
                    let default_obj = expect_object(v, &default_context)?;
                    Some(nested_level(
                        default_obj.get(keys::ACTIONS),
                        &default_context,
                        names,
                    )?)
                }
                None => None,
            };
            ActionKind::Switch { cases, default }
        }
        "Scope" | "Foreach" | "Until" => {
            consumed.push(keys::ACTIONS);
            let actions = nested_level(obj.get(keys::ACTIONS), &context, names)?;
            match type_name.as_str() {
                "Scope" => ActionKind::Scope { actions },
                "Foreach" => ActionKind::Foreach { actions },
                _ => ActionKind::Until { actions },
            }
        }
        other => {
            ActionKind::atomic_from_type_name(other).ok_or_else(|| StructuralError::UnknownKind {
                node: name.to_string(),
                type_name: other.to_string(),
            })?
        }
    };

    let run_after = match obj.get(keys::RUN_AFTER) {
        Some(v) => parse_run_after(v, &context)?,
        None => Vec::new(),
    };

    let mut parameters = Parameters::new();
    for (key, value) in obj {
        if !consumed.contains(&key.as_str()) {
            parameters.insert(key.clone(), value.clone());
        }
    }

    Ok(Node {
        name: name.to_string(),
        kind,
        parameters,
        run_after,
    })
}

fn nested_level(
    value: Option<&Value>,
    context: &str,
    names: &mut NameRegistry,
) -> Result<Vec<Node>, DefinitionError> {
    match value {
        Some(v) => {
            let level_context = format!("{}.{}", context, keys::ACTIONS);
            parse_level(expect_object(v, &level_context)?, &level_context, names)
        }
        None => Ok(Vec::new()),
    }
}

fn parse_run_after(value: &Value, context: &str) -> Result<Vec<RunAfterEntry>, DefinitionError> {
    let run_after_context = format!("{}.{}", context, keys::RUN_AFTER);
    let obj = expect_object(value, &run_after_context)?;
    let mut entries = Vec::with_capacity(obj.len());
    for (predecessor, statuses) in obj {
        let list = statuses.as_array().ok_or_else(|| {
            malformed(&run_after_context, "expected an array of status strings")
        })?;
        let mut parsed = Vec::with_capacity(list.len());
        for status in list {
            let token = status
                .as_str()
                .ok_or_else(|| malformed(&run_after_context, "status tokens must be strings"))?;
            parsed.push(token.to_string());
        }
        entries.push(RunAfterEntry {
            predecessor: predecessor.clone(),
            statuses: parsed,
        });
    }
    Ok(entries)
}

fn required_type(obj: &Map<String, Value>, context: &str) -> Result<String, DefinitionError> {
    match obj.get(keys::TYPE) {
        Some(v) => expect_string(v, context),
        None => Err(malformed(context, "missing 'type'")),
    }
}

fn expect_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>, DefinitionError> {
    value
        .as_object()
        .ok_or_else(|| malformed(context, "expected a JSON object"))
}

fn expect_string(value: &Value, context: &str) -> Result<String, DefinitionError> {
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| malformed(context, "expected a JSON string"))
}

fn malformed(context: &str, message: &str) -> DefinitionError {
    DefinitionError::Malformed {
        context: context.to_string(),
        message: message.to_string(),
    }
}

/// Whole-tree name registry. Claiming a name twice is the duplicate-name
/// structural error, no matter how far apart the two uses are nested.
#[derive(Default)]
struct NameRegistry {
    taken: AHashSet<String>,
}

impl NameRegistry {
    fn claim(&mut self, name: &str) -> Result<(), StructuralError> {
        if !self.taken.insert(name.to_string()) {
            return Err(StructuralError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}
