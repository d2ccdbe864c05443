//! `errtree` — turns flat lists of schema-validation failures into a
//! compact, human-readable diagnostic tree.
//!
//! A structural validator reports one error per violated leaf constraint,
//! each carrying the full path from the schema root down to the failing
//! node. This crate rebuilds the tree implied by shared path prefixes,
//! discards union branches that clearly do not describe the actual input,
//! merges intersection branches into one coherent shape, and renders the
//! result as indented text.

/// Error-tree construction, reduction, and rendering.
pub mod report;
