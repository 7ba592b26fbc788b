use serde_json::{Map, Value};

/// Opaque, order-preserving parameter object carried by every node.
///
/// The core round-trips these without interpretation; expression strings,
/// `inputs` payloads and the like live here.
pub type Parameters = Map<String, Value>;

/// The kind of the single workflow entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Recurrence,
    Request,
    Http,
}

impl TriggerKind {
    /// The `type` string used by the definition language.
    pub fn type_name(&self) -> &'static str {
        match self {
            TriggerKind::Recurrence => "Recurrence",
            TriggerKind::Request => "Request",
            TriggerKind::Http => "Http",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Recurrence" => Some(TriggerKind::Recurrence),
            "Request" => Some(TriggerKind::Request),
            "Http" => Some(TriggerKind::Http),
            _ => None,
        }
    }
}

/// The single entry point of a workflow. Triggers have no predecessors,
/// so they carry no run-after set at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub name: String,
    pub kind: TriggerKind,
    pub parameters: Parameters,
}

impl Trigger {
    pub fn new(name: impl Into<String>, kind: TriggerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Parameters::new(),
        }
    }
}

/// One status-qualified dependency edge: this node runs after `predecessor`
/// once it finishes with one of `statuses`.
///
/// Status tokens are opaque and matched exactly; the well-known spellings
/// live in [`crate::graph::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAfterEntry {
    pub predecessor: String,
    pub statuses: Vec<String>,
}

impl RunAfterEntry {
    pub fn new(predecessor: impl Into<String>, statuses: &[&str]) -> Self {
        Self {
            predecessor: predecessor.into(),
            statuses: statuses.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// One named case of a Switch scope, with its opaque `case` discriminant.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub name: String,
    pub value: Option<Value>,
    pub actions: Vec<Node>,
}

/// The closed set of action kinds. Scope kinds own their nested levels as
/// payload, so the serializer and deserializer can dispatch exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    If {
        actions: Vec<Node>,
        else_actions: Option<Vec<Node>>,
    },
    Switch {
        cases: Vec<SwitchCase>,
        default: Option<Vec<Node>>,
    },
    Scope {
        actions: Vec<Node>,
    },
    Foreach {
        actions: Vec<Node>,
    },
    Until {
        actions: Vec<Node>,
    },
    InitializeVariable,
    SetVariable,
    Terminate,
    Compose,
    Http,
    Response,
    Wait,
    ParseJson,
}

impl ActionKind {
    /// The `type` string used by the definition language.
    pub fn type_name(&self) -> &'static str {
        match self {
            ActionKind::If { .. } => "If",
            ActionKind::Switch { .. } => "Switch",
            ActionKind::Scope { .. } => "Scope",
            ActionKind::Foreach { .. } => "Foreach",
            ActionKind::Until { .. } => "Until",
            ActionKind::InitializeVariable => "InitializeVariable",
            ActionKind::SetVariable => "SetVariable",
            ActionKind::Terminate => "Terminate",
            ActionKind::Compose => "Compose",
            ActionKind::Http => "Http",
            ActionKind::Response => "Response",
            ActionKind::Wait => "Wait",
            ActionKind::ParseJson => "ParseJson",
        }
    }

    /// Resolves a `type` string to a kind without scope payload. Scope kinds
    /// return `None` here; the deserializer builds those from their nested
    /// sub-graph keys.
    pub fn atomic_from_type_name(name: &str) -> Option<Self> {
        match name {
            "InitializeVariable" => Some(ActionKind::InitializeVariable),
            "SetVariable" => Some(ActionKind::SetVariable),
            "Terminate" => Some(ActionKind::Terminate),
            "Compose" => Some(ActionKind::Compose),
            "Http" => Some(ActionKind::Http),
            "Response" => Some(ActionKind::Response),
            "Wait" => Some(ActionKind::Wait),
            "ParseJson" => Some(ActionKind::ParseJson),
            _ => None,
        }
    }

    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            ActionKind::If { .. }
                | ActionKind::Switch { .. }
                | ActionKind::Scope { .. }
                | ActionKind::Foreach { .. }
                | ActionKind::Until { .. }
        )
    }

    /// The nested levels owned by this kind, in declaration order:
    /// If emits `actions` then `else`, Switch emits its cases then `default`.
    /// Atomic kinds own no levels.
    pub fn levels(&self) -> Vec<&Vec<Node>> {
        match self {
            ActionKind::If {
                actions,
                else_actions,
            } => {
                let mut levels = vec![actions];
                if let Some(else_level) = else_actions {
                    levels.push(else_level);
                }
                levels
            }
            ActionKind::Switch { cases, default } => {
                let mut levels: Vec<&Vec<Node>> = cases.iter().map(|c| &c.actions).collect();
                if let Some(default_level) = default {
                    levels.push(default_level);
                }
                levels
            }
            ActionKind::Scope { actions }
            | ActionKind::Foreach { actions }
            | ActionKind::Until { actions } => vec![actions],
            _ => Vec::new(),
        }
    }

    /// Mutable variant of [`ActionKind::levels`], same order.
    pub fn levels_mut(&mut self) -> Vec<&mut Vec<Node>> {
        match self {
            ActionKind::If {
                actions,
                else_actions,
            } => {
                let mut levels = vec![actions];
                if let Some(else_level) = else_actions {
                    levels.push(else_level);
                }
                levels
            }
            ActionKind::Switch { cases, default } => {
                let mut levels: Vec<&mut Vec<Node>> =
                    cases.iter_mut().map(|c| &mut c.actions).collect();
                if let Some(default_level) = default {
                    levels.push(default_level);
                }
                levels
            }
            ActionKind::Scope { actions }
            | ActionKind::Foreach { actions }
            | ActionKind::Until { actions } => vec![actions],
            _ => Vec::new(),
        }
    }
}

/// One unit of work in the workflow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: ActionKind,
    pub parameters: Parameters,
    pub run_after: Vec<RunAfterEntry>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Parameters::new(),
            run_after: Vec::new(),
        }
    }

    pub fn with_run_after(mut self, predecessor: impl Into<String>, statuses: &[&str]) -> Self {
        self.run_after.push(RunAfterEntry::new(predecessor, statuses));
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// A head node has no predecessors and executes first at its level.
    pub fn is_head(&self) -> bool {
        self.run_after.is_empty()
    }

    pub fn run_after_entry(&self, predecessor: &str) -> Option<&RunAfterEntry> {
        self.run_after.iter().find(|e| e.predecessor == predecessor)
    }
}
