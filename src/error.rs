use thiserror::Error;

/// Structural violations of the workflow graph invariants.
///
/// These are always reported to the caller, never silently repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Node '{node}' runs after '{predecessor}', which does not exist at the same level")]
    DanglingRunAfter { node: String, predecessor: String },

    #[error("The run-after relation contains a cycle through: {}", nodes.join(", "))]
    CycleDetected { nodes: Vec<String> },

    #[error("Node name '{0}' is used more than once in the workflow")]
    DuplicateName(String),

    #[error("The workflow has no trigger")]
    MissingTrigger,

    #[error("The workflow declares {0} triggers, but exactly one is allowed")]
    MultipleTriggers(usize),

    #[error("Node '{node}' has an unknown type: '{type_name}'")]
    UnknownKind { node: String, type_name: String },

    #[error("Trigger '{0}' carries a runAfter entry, but triggers have no predecessors")]
    TriggerRunAfter(String),

    #[error("Node '{node}' runs after '{predecessor}' with an empty status list")]
    EmptyStatuses { node: String, predecessor: String },
}

/// Errors produced while parsing a definition document into a workflow graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Failed to parse definition JSON: {0}")]
    Json(String),

    #[error("Malformed definition at '{context}': {message}")]
    Malformed { context: String, message: String },

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Errors produced by the structural edit operations (clone/paste, delete, rename).
///
/// Edits are all-or-nothing: when one of these is returned, the input graph
/// is untouched and no partially edited graph exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Clone source '{0}' does not exist in the current graph")]
    SourceNotFound(String),

    #[error("Target edge '{predecessor}' -> '{successor}' no longer exists in the current graph")]
    EdgeNotFound {
        predecessor: String,
        successor: String,
    },

    #[error("Node '{0}' is not a head of its level, so nothing can be pasted before it")]
    NotAHead(String),

    #[error("Node '{0}' does not exist in the current graph")]
    UnknownNode(String),

    #[error("The name '{0}' is already taken in this workflow")]
    NameCollision(String),
}

/// Errors from the identifier allocator.
///
/// The suffix probe is unbounded, so `Exhausted` documents the contract
/// rather than an expected runtime outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("No free name could be derived from base '{0}'")]
    Exhausted(String),
}
