use ahash::AHashSet;
use serde_json::Value;

use crate::error::DefinitionError;
use crate::graph::node::{Node, Parameters, Trigger};

/// The in-memory workflow graph: one trigger plus the top-level action
/// level, with scope nodes owning arbitrarily deep nested levels.
///
/// This is a plain value. Engines (resolver, serializer, edit operations)
/// borrow it and return new values or typed errors; nothing here mutates a
/// caller-held graph behind its back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workflow {
    /// The `$schema` document key, round-tripped untouched.
    pub schema: Option<String>,
    /// The `contentVersion` document key.
    pub content_version: Option<String>,
    /// The single entry point. `validate` rejects `None`.
    pub trigger: Option<Trigger>,
    /// Top-level actions in insertion order. Order carries no execution
    /// semantics; the run-after relation is the only source of ordering.
    pub actions: Vec<Node>,
    /// The `outputs` document key, opaque to the core. `None` when the
    /// source document had no `outputs` key at all.
    pub outputs: Option<Parameters>,
    /// Any other root keys of the definition document (`parameters`, ...),
    /// preserved for the round trip.
    pub extra: Parameters,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a definition document. See [`crate::definition::parse`].
    pub fn from_definition(json: &str) -> Result<Self, DefinitionError> {
        crate::definition::parse(json)
    }

    /// Projects this graph into its definition document.
    /// See [`crate::definition::to_value`].
    pub fn to_definition(&self) -> Value {
        crate::definition::to_value(self)
    }

    /// Depth-first iteration over every action in the tree, nested scope
    /// levels included. Uses an explicit stack, so nesting depth is
    /// unbounded.
    pub fn iter(&self) -> ActionIter<'_> {
        let mut stack: Vec<&Node> = Vec::with_capacity(self.actions.len());
        for node in self.actions.iter().rev() {
            stack.push(node);
        }
        ActionIter { stack }
    }

    /// Finds an action anywhere in the tree by name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.iter().find(|n| n.name == name)
    }

    /// True if `name` is taken by the trigger or any action in the tree.
    pub fn contains_name(&self, name: &str) -> bool {
        if self.trigger.as_ref().is_some_and(|t| t.name == name) {
            return true;
        }
        self.find(name).is_some()
    }

    /// Every name in the graph (trigger included), for seeding the
    /// identifier allocator.
    pub fn names(&self) -> AHashSet<String> {
        let mut names = AHashSet::new();
        if let Some(trigger) = &self.trigger {
            names.insert(trigger.name.clone());
        }
        for node in self.iter() {
            names.insert(node.name.clone());
        }
        names
    }
}

/// Iterator behind [`Workflow::iter`].
pub struct ActionIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for ActionIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for level in node.kind.levels().into_iter().rev() {
            for child in level.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

/// True if `name` appears anywhere in `level` or its nested levels.
pub(crate) fn level_contains(level: &[Node], name: &str) -> bool {
    level.iter().any(|n| {
        n.name == name
            || n.kind
                .levels()
                .into_iter()
                .any(|nested| level_contains(nested, name))
    })
}

/// Finds the level (top-level or nested) that directly contains `name` and
/// hands it back mutably. Used by the edit operations to splice in place.
///
/// Descends by index so the mutable borrow is re-established one level at
/// a time rather than threaded through the search.
pub(crate) fn level_of_mut<'a>(level: &'a mut Vec<Node>, name: &str) -> Option<&'a mut Vec<Node>> {
    if level.iter().any(|n| n.name == name) {
        return Some(level);
    }
    let mut path = None;
    'outer: for (node_idx, node) in level.iter().enumerate() {
        for (level_idx, nested) in node.kind.levels().into_iter().enumerate() {
            if level_contains(nested, name) {
                path = Some((node_idx, level_idx));
                break 'outer;
            }
        }
    }
    let (node_idx, level_idx) = path?;
    let nested = level[node_idx]
        .kind
        .levels_mut()
        .into_iter()
        .nth(level_idx)?;
    level_of_mut(nested, name)
}
