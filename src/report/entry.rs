//! The validator boundary: context entries, their identity arena, and
//! validation errors.
//!
//! The source environment grouped sibling failures by *reference
//! identity* of shared path segments. Here that aliasing is made
//! explicit: the validator inserts each [`ContextEntry`] into an
//! [`EntryArena`] once and reuses the returned [`EntryId`] in every
//! error whose path passes through that segment. Two entries are the
//! same tree node only when their ids are equal — structural equality
//! of entries is never consulted.

use std::sync::Arc;

use super::descriptor::TypeDescriptor;
use super::value::Value;

/// Surrogate identity of a [`ContextEntry`] within an [`EntryArena`].
///
/// Ids are dense indices assigned at insertion time. The validator must
/// reuse the same id for path segments shared by multiple errors; a
/// fresh id per error degrades grouping (a more verbose report), never
/// correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// One path segment of a validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextEntry {
    /// The segment key: a property name, an array index, or a synthetic
    /// ordinal introduced by intersection merging.
    pub key: String,
    /// The shape the validator expected at this position.
    pub ty: Arc<TypeDescriptor>,
    /// The value actually found, or `None` if the position was never
    /// supplied. A supplied `Value::Null` is not absent.
    pub actual: Option<Value>,
}

impl ContextEntry {
    /// An entry for a position that held `actual`.
    #[must_use]
    pub fn new(key: impl Into<String>, ty: Arc<TypeDescriptor>, actual: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            ty,
            actual: Some(actual.into()),
        }
    }

    /// An entry for a required position that was never supplied.
    #[must_use]
    pub fn absent(key: impl Into<String>, ty: Arc<TypeDescriptor>) -> Self {
        Self {
            key: key.into(),
            ty,
            actual: None,
        }
    }
}

/// Owns every [`ContextEntry`] referenced by a batch of validation
/// errors and assigns each its [`EntryId`].
///
/// The arena is built by the validator before this crate runs and is
/// read-only from the reducer's perspective.
#[derive(Debug, Default)]
pub struct EntryArena {
    entries: Vec<ContextEntry>,
}

impl EntryArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry and returns its id.
    pub fn insert(&mut self, entry: ContextEntry) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries.push(entry);
        id
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&ContextEntry> {
        self.entries.get(id.0)
    }

    /// The number of entries in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the arena holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One validation failure: the path from the schema root down to the
/// violated leaf constraint, as entry ids into an [`EntryArena`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The root-to-leaf path of context entries.
    pub context: Vec<EntryId>,
}

impl ValidationError {
    /// A validation error for the given root-to-leaf path.
    #[must_use]
    pub const fn new(context: Vec<EntryId>) -> Self {
        Self { context }
    }
}
