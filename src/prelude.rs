//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and operations so callers can
//! bring the whole core surface in with a single import.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowdef::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/definition.json")?;
//! let workflow = Workflow::from_definition(&json)?;
//!
//! resolver::validate(&workflow).expect("definition upholds the graph invariants");
//! println!("{}", definition::to_string_pretty(&workflow));
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    ActionKind, Node, Parameters, RunAfterEntry, SwitchCase, Trigger, TriggerKind, Workflow,
};

// Validation and naming
pub use crate::graph::resolver;
pub use crate::graph::status;
pub use crate::naming::NameAllocator;

// Definition round trip
pub use crate::definition;

// Structural edits
pub use crate::edit::{SpliceEdge, clone_paste, delete_node, rename_node};

// Error types
pub use crate::error::{AllocationError, DefinitionError, SpliceError, StructuralError};

// serde_json re-exports commonly used with this crate
pub use serde_json::{Map, Value, json};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
