//! # flowdef - Workflow Definition Graph Core
//!
//! **flowdef** is the graph core of a visual workflow designer. It owns the
//! bidirectional mapping between an in-memory workflow graph (one trigger,
//! actions, nested control-flow scopes) and the JSON definition language the
//! execution runtime consumes, and it implements the structural edits a
//! designer surface needs: clone/paste of a whole scope subtree, node
//! deletion with dependency rewiring, and collision-checked renaming.
//!
//! ## Core Model
//!
//! A [`graph::Workflow`] is a plain value: a trigger plus an ordered list of
//! actions, where scope-kind actions (If, Switch, Scope, Foreach, Until) own
//! nested action levels of their own. Dependencies are expressed by name in
//! each node's run-after set, never by pointers, so the graph has no cyclic
//! ownership; the [`graph::resolver`] checks that every level's run-after
//! relation stays a DAG and that names are unique across the entire tree.
//!
//! Everything here is synchronous and deterministic. Operations borrow a
//! graph and return a new graph value or a typed error; nothing is repaired
//! silently and nothing is mutated behind the caller's back.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowdef::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let definition = r#"{
//!         "$schema": "https://example.com/workflowdefinition.json#",
//!         "contentVersion": "1.0.0.0",
//!         "triggers": {
//!             "Recurrence": { "type": "Recurrence" }
//!         },
//!         "actions": {
//!             "Fetch": { "type": "Http", "runAfter": {} },
//!             "Publish": { "type": "Compose", "runAfter": { "Fetch": ["Succeeded"] } }
//!         },
//!         "outputs": {}
//!     }"#;
//!
//!     // Definition -> graph. Structural problems (dangling runAfter,
//!     // cycles, duplicate names, trigger count) are typed errors.
//!     let workflow = Workflow::from_definition(definition)?;
//!     assert!(resolver::validate(&workflow).is_ok());
//!
//!     // Clone "Publish" and splice the copy onto the Fetch -> Publish edge.
//!     let edited = clone_paste(
//!         &workflow,
//!         "Publish",
//!         &SpliceEdge::Between {
//!             predecessor: "Fetch".to_string(),
//!             successor: "Publish".to_string(),
//!         },
//!     )?;
//!     assert!(edited.find("Publish-copy").is_some());
//!
//!     // Graph -> definition -> graph is lossless.
//!     let round_tripped = Workflow::from_definition(&edited.to_definition().to_string())?;
//!     assert_eq!(edited, round_tripped);
//!     Ok(())
//! }
//! ```

pub mod definition;
pub mod edit;
pub mod error;
pub mod graph;
pub mod naming;
pub mod prelude;
