//! Dependency resolution over the run-after relation.
//!
//! Each scope level is validated on its own: every referenced predecessor
//! must exist as a sibling, and the relation restricted to the level must be
//! a DAG. Run-after is the sole source of ordering truth; the resolver never
//! derives meaning from positional order.

use std::collections::VecDeque;

use ahash::AHashMap;
use itertools::Itertools;

use crate::error::StructuralError;
use crate::graph::node::Node;
use crate::graph::workflow::Workflow;

/// The head nodes of a level: empty run-after, executed first.
pub fn heads(level: &[Node]) -> Vec<&str> {
    level
        .iter()
        .filter(|n| n.is_head())
        .map(|n| n.name.as_str())
        .collect()
}

/// Validates a single level: referential integrity of every run-after
/// entry, non-empty status lists, and acyclicity. Fails fast with the
/// first violation found.
pub fn validate_level(level: &[Node]) -> Result<(), StructuralError> {
    let name_to_idx: AHashMap<&str, usize> = level
        .iter()
        .enumerate()
        .map(|(i, n)| (n.name.as_str(), i))
        .collect();

    for node in level {
        for entry in &node.run_after {
            if entry.statuses.is_empty() {
                return Err(StructuralError::EmptyStatuses {
                    node: node.name.clone(),
                    predecessor: entry.predecessor.clone(),
                });
            }
            if !name_to_idx.contains_key(entry.predecessor.as_str()) {
                return Err(StructuralError::DanglingRunAfter {
                    node: node.name.clone(),
                    predecessor: entry.predecessor.clone(),
                });
            }
        }
    }

    // Kahn's algorithm over the run-after edges.
    let mut indegree: Vec<usize> = level.iter().map(|n| n.run_after.len()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); level.len()];
    for (i, node) in level.iter().enumerate() {
        for entry in &node.run_after {
            dependents[name_to_idx[entry.predecessor.as_str()]].push(i);
        }
    }

    let mut queue: VecDeque<usize> = indegree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| i)
        .collect();
    let mut processed = 0usize;
    while let Some(i) = queue.pop_front() {
        processed += 1;
        for &dep in &dependents[i] {
            indegree[dep] -= 1;
            if indegree[dep] == 0 {
                queue.push_back(dep);
            }
        }
    }

    if processed < level.len() {
        let nodes = level
            .iter()
            .enumerate()
            .filter(|(i, _)| indegree[*i] > 0)
            .map(|(_, n)| n.name.clone())
            .collect();
        return Err(StructuralError::CycleDetected { nodes });
    }

    Ok(())
}

/// Validates the whole graph and collects every structural error found:
/// trigger cardinality, whole-tree name uniqueness, and the per-level
/// checks of [`validate_level`] at every nesting depth.
///
/// An empty error list means the graph upholds all invariants.
pub fn validate(workflow: &Workflow) -> Result<(), Vec<StructuralError>> {
    let mut errors = Vec::new();

    if workflow.trigger.is_none() {
        errors.push(StructuralError::MissingTrigger);
    }

    let mut all_names: Vec<&str> = Vec::new();
    if let Some(trigger) = &workflow.trigger {
        all_names.push(trigger.name.as_str());
    }
    all_names.extend(workflow.iter().map(|n| n.name.as_str()));
    for dup in all_names.iter().duplicates() {
        errors.push(StructuralError::DuplicateName((*dup).to_string()));
    }

    if let Err(e) = validate_level(&workflow.actions) {
        errors.push(e);
    }
    for node in workflow.iter() {
        for level in node.kind.levels() {
            if let Err(e) = validate_level(level) {
                errors.push(e);
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
