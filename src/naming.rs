//! Globally-unique node identifier allocation.
//!
//! Name uniqueness is a whole-graph invariant, so the allocator is seeded
//! with every name across every nesting level, and every grant it makes is
//! recorded so successive allocations never collide with each other.

use ahash::AHashSet;

use crate::graph::workflow::Workflow;

/// Hands out node names guaranteed to be unique across the whole graph.
pub struct NameAllocator {
    taken: AHashSet<String>,
}

impl NameAllocator {
    /// Seeds the allocator with every name in the workflow, trigger and all
    /// nested scope levels included.
    pub fn for_workflow(workflow: &Workflow) -> Self {
        Self {
            taken: workflow.names(),
        }
    }

    pub fn from_names(taken: AHashSet<String>) -> Self {
        Self { taken }
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Returns `base` unchanged when it is free. Otherwise strips one
    /// trailing `_<digits>` suffix from `base` to obtain the probe stem and
    /// returns the first free `stem_<n>` for n = 1, 2, …
    ///
    /// The stem rule keeps clone numbering in one family: with `Terminate`
    /// and `Terminate_2` both taken, cloning them grants `Terminate_1` and
    /// `Terminate_3` rather than `Terminate_2_1`.
    pub fn allocate(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let stem = stem_of(base);
        let mut n: u64 = 1;
        loop {
            let candidate = format!("{}_{}", stem, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Strips one trailing `_<digits>` suffix, if any.
fn stem_of(base: &str) -> &str {
    match base.rsplit_once('_') {
        Some((stem, suffix))
            if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) =>
        {
            stem
        }
        _ => base,
    }
}
