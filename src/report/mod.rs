//! Error-tree construction, reduction, and rendering.
//!
//! The pipeline has three stages, all pure and synchronous:
//!
//! 1. **Collect** — fold the flat error list into a tree keyed by
//!    [`EntryId`], so errors sharing a path prefix share ancestors.
//! 2. **Reduce** — bottom-up, drop union branches that cannot plausibly
//!    describe the actual value, merge record-shaped intersection
//!    branches into one synthetic record, and flatten branching nodes
//!    left with a single child.
//! 3. **Render** — walk the reduced tree and emit indented diagnostic
//!    text, one line or block per node.
//!
//! The public surface is two entry points: [`reduce`] (errors → reduced
//! tree) and [`render`] (errors → report string). Everything a caller
//! needs to feed them — the descriptor model, the runtime value model,
//! and the entry arena — is re-exported here.

mod descriptor;
mod entry;
mod error;
mod reduce;
mod render;
mod summary;
mod tree;
mod value;

pub use descriptor::{PropertyMap, TypeDescriptor, TypeKind};
pub use entry::{ContextEntry, EntryArena, EntryId, ValidationError};
pub use error::ReportError;
pub use reduce::reduce;
pub use render::render;
pub use tree::{ReportNode, ReportTree};
pub use value::Value;
