//! Error types for error-tree construction.

use super::entry::EntryId;

/// Errors that can occur when building a report from validation errors.
///
/// Reduction and rendering themselves have no failure mode: malformed
/// input (for example, a broken entry-sharing contract) degrades into a
/// less-merged, more verbose report rather than an error. The only
/// rejected input is a path that references an entry the arena does not
/// contain, which is an API-misuse condition the caller must fix.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A validation error path referenced an entry id that is not
    /// present in the supplied arena.
    #[error("validation error path references unknown entry {id:?}")]
    UnknownEntry {
        /// The dangling entry id.
        id: EntryId,
    },
}
