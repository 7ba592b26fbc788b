//! Structural edit operations: clone/paste of a subtree, node deletion,
//! and node renaming.
//!
//! Every operation takes the current graph by reference and returns a new
//! graph value or a typed error. Edits are all-or-nothing: a stale
//! coordinate aborts before any result exists, and the caller's graph is
//! never touched.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::error::SpliceError;
use crate::graph::node::{Node, RunAfterEntry};
use crate::graph::status;
use crate::graph::workflow::{Workflow, level_of_mut};
use crate::naming::NameAllocator;

/// A paste target, described as graph-relative coordinates by the editing
/// surface. Existence is re-validated against the graph before anything
/// is spliced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceEdge {
    /// The dependency edge from `predecessor` to `successor`: the clone
    /// takes over the successor's entry on the predecessor, and the
    /// successor is rewritten to run after the clone with the same
    /// status set.
    Between {
        predecessor: String,
        successor: String,
    },
    /// Before `successor`, which must currently be a head of its level.
    /// The clone becomes the new head; the successor runs after it on
    /// success.
    Head { successor: String },
}

/// Deep-clones the action named `source` (with its entire nested subtree),
/// renames every cloned node to a fresh globally-unique name, and splices
/// the clone in at `edge`.
///
/// The clone's root prefers `<source>-copy` as its name; descendants prefer
/// their original names. Renaming runs root-first, then over the nested
/// levels breadth-first, so the numbering is deterministic for identical
/// input graphs. Intra-subtree run-after references follow the renames;
/// everything outside the clone and the splice point stays untouched.
///
/// The trigger is not a valid clone source.
pub fn clone_paste(
    workflow: &Workflow,
    source: &str,
    edge: &SpliceEdge,
) -> Result<Workflow, SpliceError> {
    let source_node = workflow
        .find(source)
        .ok_or_else(|| SpliceError::SourceNotFound(source.to_string()))?;

    let mut allocator = NameAllocator::for_workflow(workflow);
    let mut clone = source_node.clone();
    let mut renames: AHashMap<String, String> = AHashMap::new();
    clone.name = allocator.allocate(&format!("{}-copy", source_node.name));

    // Breadth-first over the nested levels; the whole subtree's original
    // names are still present in the graph, so every descendant is renamed.
    let mut queue: VecDeque<&mut Vec<Node>> = clone.kind.levels_mut().into();
    while let Some(level) = queue.pop_front() {
        for node in level {
            let fresh = allocator.allocate(&node.name);
            let old = std::mem::replace(&mut node.name, fresh.clone());
            renames.insert(old, fresh);
            for child in node.kind.levels_mut() {
                queue.push_back(child);
            }
        }
    }
    for nested in clone.kind.levels_mut() {
        rewrite_references(nested, &renames);
    }

    let mut next = workflow.clone();
    match edge {
        SpliceEdge::Between {
            predecessor,
            successor,
        } => {
            let stale = || SpliceError::EdgeNotFound {
                predecessor: predecessor.clone(),
                successor: successor.clone(),
            };
            let level = level_of_mut(&mut next.actions, successor).ok_or_else(stale)?;
            if !level.iter().any(|n| n.name == *predecessor) {
                return Err(stale());
            }
            let successor_node = level
                .iter_mut()
                .find(|n| n.name == *successor)
                .ok_or_else(stale)?;
            let entry = successor_node
                .run_after
                .iter_mut()
                .find(|e| e.predecessor == *predecessor)
                .ok_or_else(stale)?;
            clone.run_after = vec![RunAfterEntry {
                predecessor: predecessor.clone(),
                statuses: entry.statuses.clone(),
            }];
            entry.predecessor = clone.name.clone();
            level.push(clone);
        }
        SpliceEdge::Head { successor } => {
            let unknown = || SpliceError::UnknownNode(successor.clone());
            let level = level_of_mut(&mut next.actions, successor).ok_or_else(unknown)?;
            let successor_node = level
                .iter_mut()
                .find(|n| n.name == *successor)
                .ok_or_else(unknown)?;
            if !successor_node.is_head() {
                return Err(SpliceError::NotAHead(successor.clone()));
            }
            clone.run_after = Vec::new();
            successor_node.run_after =
                vec![RunAfterEntry::new(clone.name.clone(), &[status::SUCCEEDED])];
            level.push(clone);
        }
    }
    Ok(next)
}

/// Removes the action named `name`, and with it its whole nested subtree.
///
/// Siblings that ran after the deleted node inherit its predecessors,
/// keeping their own status requirements; entries they already carry are
/// left alone. Deleting a head simply drops the dependents' entries on it.
pub fn delete_node(workflow: &Workflow, name: &str) -> Result<Workflow, SpliceError> {
    let mut next = workflow.clone();
    let level = level_of_mut(&mut next.actions, name)
        .ok_or_else(|| SpliceError::UnknownNode(name.to_string()))?;
    let position = level
        .iter()
        .position(|n| n.name == name)
        .ok_or_else(|| SpliceError::UnknownNode(name.to_string()))?;
    let removed = level.remove(position);

    for node in level.iter_mut() {
        let Some(entry_position) = node.run_after.iter().position(|e| e.predecessor == name)
        else {
            continue;
        };
        let entry = node.run_after.remove(entry_position);
        let mut insert_at = entry_position;
        for inherited in &removed.run_after {
            if node
                .run_after
                .iter()
                .any(|e| e.predecessor == inherited.predecessor)
            {
                continue;
            }
            node.run_after.insert(
                insert_at,
                RunAfterEntry {
                    predecessor: inherited.predecessor.clone(),
                    statuses: entry.statuses.clone(),
                },
            );
            insert_at += 1;
        }
    }
    Ok(next)
}

/// Renames one action. Fails when `new` collides with any name anywhere in
/// the tree. Sibling run-after references to the old name are rewritten;
/// nothing else changes.
pub fn rename_node(workflow: &Workflow, old: &str, new: &str) -> Result<Workflow, SpliceError> {
    if workflow.contains_name(new) {
        return Err(SpliceError::NameCollision(new.to_string()));
    }
    let mut next = workflow.clone();
    let level = level_of_mut(&mut next.actions, old)
        .ok_or_else(|| SpliceError::UnknownNode(old.to_string()))?;
    for node in level.iter_mut() {
        if node.name == old {
            node.name = new.to_string();
        }
        for entry in node.run_after.iter_mut() {
            if entry.predecessor == old {
                entry.predecessor = new.to_string();
            }
        }
    }
    Ok(next)
}

fn rewrite_references(level: &mut Vec<Node>, renames: &AHashMap<String, String>) {
    for node in level.iter_mut() {
        for entry in node.run_after.iter_mut() {
            if let Some(renamed) = renames.get(&entry.predecessor) {
                entry.predecessor = renamed.clone();
            }
        }
        for child in node.kind.levels_mut() {
            rewrite_references(child, renames);
        }
    }
}
