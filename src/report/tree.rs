//! Error-tree types and the tree builder.
//!
//! The builder folds the flat error list into a [`RawTree`] keyed by
//! entry id, so that errors sharing a path prefix collapse into shared
//! ancestor nodes. Reduction then produces the public [`ReportTree`] —
//! a fresh, owned structure; the raw tree is never mutated in place.

use indexmap::IndexMap;

use super::entry::{ContextEntry, EntryArena, EntryId, ValidationError};
use super::error::ReportError;

/// The raw nesting of context entries implied by the error paths.
///
/// A node with no children is a leaf: a single unsatisfied constraint.
/// Insertion order is preserved; it drives rendering order and the
/// tie-break order of union reduction.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RawTree {
    /// Child subtrees, keyed by the identity of their context entry.
    pub(crate) children: IndexMap<EntryId, RawTree>,
}

/// Folds the error list into one tree representing the union of all
/// paths.
///
/// Each error's path is walked root-to-leaf; at each segment the entry
/// is looked up among the current children *by id* and a new empty
/// child is inserted if absent.
///
/// # Errors
///
/// Returns [`ReportError::UnknownEntry`] if a path references an id
/// that is not present in `arena`.
pub(crate) fn collect_tree(
    errors: &[ValidationError],
    arena: &EntryArena,
) -> Result<RawTree, ReportError> {
    let mut root = RawTree::default();
    for error in errors {
        let mut node = &mut root;
        for &id in &error.context {
            if arena.get(id).is_none() {
                return Err(ReportError::UnknownEntry { id });
            }
            node = node.children.entry(id).or_default();
        }
    }
    Ok(root)
}

/// Identity of a reduced-tree node, used when merged subtrees collide.
///
/// Arena-backed nodes keep the id of the entry they were built from;
/// nodes minted by intersection merging get fresh synthetic keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeKey {
    /// The node was built from an arena entry.
    Entry(EntryId),
    /// The node was minted during reduction.
    Synthetic(usize),
}

/// One node of a reduced error tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportNode {
    /// Provenance identity, for merge-collision handling.
    pub(crate) key: NodeKey,
    /// The context entry this node reports on.
    pub entry: ContextEntry,
    /// Sub-failures, in rendering order. Empty for a leaf constraint.
    pub children: Vec<ReportNode>,
}

/// A reduced error tree, ready for rendering or inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTree {
    /// Top-level failures, in the order their errors first appeared.
    pub roots: Vec<ReportNode>,
}

#[cfg(test)]
mod tests {
    use super::{RawTree, collect_tree};
    use crate::report::descriptor::TypeDescriptor;
    use crate::report::entry::{ContextEntry, EntryArena, EntryId, ValidationError};

    fn entry(arena: &mut EntryArena, key: &str) -> EntryId {
        arena.insert(ContextEntry::new(key, TypeDescriptor::string(), "v"))
    }

    /// Collects every root-to-leaf id path of a raw tree.
    fn leaf_paths(tree: &RawTree) -> Vec<Vec<EntryId>> {
        fn walk(node: &RawTree, prefix: &[EntryId], out: &mut Vec<Vec<EntryId>>) {
            if node.children.is_empty() && !prefix.is_empty() {
                out.push(prefix.to_vec());
                return;
            }
            for (&id, child) in &node.children {
                let mut next = prefix.to_vec();
                next.push(id);
                walk(child, &next, out);
            }
        }
        let mut out = Vec::new();
        walk(tree, &[], &mut out);
        out
    }

    #[test]
    fn shared_prefixes_collapse_into_one_ancestor() {
        let mut arena = EntryArena::new();
        let root = entry(&mut arena, "root");
        let left = entry(&mut arena, "left");
        let right = entry(&mut arena, "right");
        let errors = vec![
            ValidationError::new(vec![root, left]),
            ValidationError::new(vec![root, right]),
        ];

        let tree = collect_tree(&errors, &arena).unwrap();

        assert_eq!(tree.children.len(), 1);
        let top = tree.children.get(&root).unwrap();
        assert_eq!(top.children.len(), 2);
    }

    #[test]
    fn rederiving_paths_reproduces_the_error_list() {
        let mut arena = EntryArena::new();
        let a = entry(&mut arena, "a");
        let b = entry(&mut arena, "b");
        let c = entry(&mut arena, "c");
        let d = entry(&mut arena, "d");
        let errors = vec![
            ValidationError::new(vec![a, b]),
            ValidationError::new(vec![a, c]),
            ValidationError::new(vec![d]),
        ];

        let tree = collect_tree(&errors, &arena).unwrap();

        let mut expected: Vec<Vec<EntryId>> =
            errors.iter().map(|e| e.context.clone()).collect();
        let mut actual = leaf_paths(&tree);
        expected.sort_by_key(|p| format!("{p:?}"));
        actual.sort_by_key(|p| format!("{p:?}"));
        assert_eq!(actual, expected);
    }

    #[test]
    fn duplicate_errors_build_the_same_tree() {
        let mut arena = EntryArena::new();
        let a = entry(&mut arena, "a");
        let b = entry(&mut arena, "b");
        let once = collect_tree(&[ValidationError::new(vec![a, b])], &arena).unwrap();
        let twice = collect_tree(
            &[
                ValidationError::new(vec![a, b]),
                ValidationError::new(vec![a, b]),
            ],
            &arena,
        )
        .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn dangling_entry_id_is_rejected() {
        let mut arena = EntryArena::new();
        let known = entry(&mut arena, "known");
        let mut other = EntryArena::new();
        let _ = entry(&mut other, "x");
        let foreign = entry(&mut other, "y");

        let result = collect_tree(&[ValidationError::new(vec![known, foreign])], &arena);
        assert!(result.is_err());
    }

    #[test]
    fn empty_error_list_builds_an_empty_tree() {
        let arena = EntryArena::new();
        let tree = collect_tree(&[], &arena).unwrap();
        assert!(tree.children.is_empty());
    }
}
