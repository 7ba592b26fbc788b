//! The definition-language document format.
//!
//! A definition is a tree-shaped JSON document keyed by node name at every
//! level. [`to_value`] projects a [`crate::graph::Workflow`] into that
//! document; [`parse`] rebuilds the graph from it. The round trip is
//! lossless: kind, parameters, run-after content and nesting all survive
//! both directions, and object key order is preserved as authored.

mod deserialize;
mod serialize;

pub use deserialize::{from_value, parse};
pub use serialize::{to_string, to_string_pretty, to_value};

/// Reserved keys of the definition language. Everything else on a node is
/// an opaque parameter; everything else at the document root is preserved
/// under [`crate::graph::Workflow::extra`].
pub mod keys {
    pub const SCHEMA: &str = "$schema";
    pub const CONTENT_VERSION: &str = "contentVersion";
    pub const TRIGGERS: &str = "triggers";
    pub const ACTIONS: &str = "actions";
    pub const OUTPUTS: &str = "outputs";
    pub const TYPE: &str = "type";
    pub const RUN_AFTER: &str = "runAfter";
    pub const ELSE: &str = "else";
    pub const CASES: &str = "cases";
    pub const CASE: &str = "case";
    pub const DEFAULT: &str = "default";
}
