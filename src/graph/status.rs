//! Well-known terminal status tokens for run-after edges.
//!
//! The core treats status tokens as opaque strings and round-trips them
//! verbatim; these constants are the canonical spellings for callers that
//! build edges programmatically.

pub const SUCCEEDED: &str = "Succeeded";
pub const FAILED: &str = "Failed";
pub const SKIPPED: &str = "Skipped";
pub const TIMED_OUT: &str = "TimedOut";
