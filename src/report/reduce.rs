//! Reduction of raw error trees: union pruning, intersection merging,
//! and wrapper flattening.
//!
//! A single bad input can fail every branch of a union, so the raw tree
//! is dominated by alternatives that were never plausible. Reduction
//! walks the tree bottom-up and, at each node, discards union branches
//! whose runtime category or property shape rules them out, merges
//! record-shaped intersection branches into one synthetic record, and
//! collapses branching nodes left with a single surviving child.
//!
//! The output is a fresh [`ReportTree`]; the raw tree is never mutated.

use std::sync::Arc;

use indexmap::IndexMap;

use super::descriptor::{PropertyMap, TypeDescriptor, TypeKind};
use super::entry::{ContextEntry, EntryArena, ValidationError};
use super::error::ReportError;
use super::summary::{JsCategory, actual_category, expected_category};
use super::tree::{NodeKey, RawTree, ReportNode, ReportTree, collect_tree};
use super::value::Value;

/// Builds the error tree for `errors` and reduces it.
///
/// This is one of the crate's two entry points; [`render`](super::render)
/// composes it with the text renderer.
///
/// # Errors
///
/// Returns [`ReportError::UnknownEntry`] if an error path references an
/// id that is not present in `arena`.
pub fn reduce(errors: &[ValidationError], arena: &EntryArena) -> Result<ReportTree, ReportError> {
    let raw = collect_tree(errors, arena)?;
    let mut reducer = Reducer {
        arena,
        next_synthetic: 0,
    };
    Ok(ReportTree {
        roots: reducer.reduce_children(&raw),
    })
}

/// Per-candidate score for union-branch reduction. Ephemeral —
/// recomputed on every reduction, never persisted.
///
/// Field order carries the comparison semantics: the derived ordering
/// maximizes matching literals first and matching properties as the
/// tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
struct KeySummary {
    matching_literals: usize,
    matching_props: usize,
}

/// How a union branch participates in reduction.
enum Relevance {
    /// Scored candidate; survives only if no candidate is strictly
    /// better.
    Reduce(KeySummary),
    /// Unjudgeable shape; always survives.
    Keep,
    /// Category mismatch while a category match exists; dropped.
    Exclude,
}

/// Reduction state: the read-only arena plus a counter for keys of
/// nodes minted during intersection merging.
struct Reducer<'a> {
    arena: &'a EntryArena,
    next_synthetic: usize,
}

impl Reducer<'_> {
    /// Reduces every child of a raw node, depth-first so that nested
    /// unions and intersections are already reduced before a parent
    /// decides whether to flatten.
    fn reduce_children(&mut self, raw: &RawTree) -> Vec<ReportNode> {
        let mut nodes = Vec::with_capacity(raw.children.len());
        for (&id, subtree) in &raw.children {
            // Ids were validated when the raw tree was collected.
            let Some(entry) = self.arena.get(id) else {
                continue;
            };
            let children = self.reduce_children(subtree);
            let mut node = ReportNode {
                key: NodeKey::Entry(id),
                entry: entry.clone(),
                children,
            };
            node = flatten_wrappers(node);
            node = self.merge_intersection(node);
            node = flatten_wrappers(node);
            if matches!(node.entry.ty.kind(), TypeKind::Union(_)) && node.children.len() > 1 {
                prune_union_branches(&mut node);
            }
            node = flatten_wrappers(node);
            nodes.push(node);
        }
        nodes
    }

    /// Merges the record-shaped children of an intersection node into
    /// one synthetic record, per `{a: {d: number}, b: string} &
    /// {a: {e: number}, c: string}` → `{a: {d: number} & {e: number},
    /// b: string, c: string}`.
    ///
    /// Children of any other shape (arrays, dictionaries, unions) stand
    /// alone next to the merged record. With fewer than two
    /// record-shaped children there is nothing to merge and the node is
    /// returned unchanged.
    fn merge_intersection(&mut self, node: ReportNode) -> ReportNode {
        if !matches!(node.entry.ty.kind(), TypeKind::Intersection(_)) || node.children.len() < 2 {
            return node;
        }
        let record_parts = node
            .children
            .iter()
            .filter(|c| matches!(c.entry.ty.kind(), TypeKind::Record(_)))
            .count();
        if record_parts < 2 {
            return node;
        }

        let ReportNode { key, entry, children } = node;
        let mut merged_props = PropertyMap::new();
        // Later parts overwrite earlier ones on key collision — an
        // accepted approximation, not a semantic merge of error detail.
        let mut merged_subnodes: IndexMap<NodeKey, ReportNode> = IndexMap::new();
        let mut standalone = Vec::new();
        for part in children {
            if let TypeKind::Record(props) = part.entry.ty.kind() {
                for (name, prop_ty) in props {
                    merge_property(&mut merged_props, name, prop_ty);
                }
                for sub in part.children {
                    merged_subnodes.insert(sub.key, sub);
                }
            } else {
                standalone.push(part);
            }
        }

        let merged_ty = TypeDescriptor::new(TypeKind::Record(merged_props));
        let mut new_children = Vec::with_capacity(1 + standalone.len());
        new_children.push(ReportNode {
            key: self.synthetic_key(),
            entry: ContextEntry {
                key: "0".to_owned(),
                ty: merged_ty,
                actual: None,
            },
            children: merged_subnodes.into_values().collect(),
        });
        for (i, part) in standalone.into_iter().enumerate() {
            new_children.push(ReportNode {
                key: self.synthetic_key(),
                entry: ContextEntry {
                    key: (i + 1).to_string(),
                    ty: part.entry.ty,
                    actual: None,
                },
                children: part.children,
            });
        }
        ReportNode {
            key,
            entry,
            children: new_children,
        }
    }

    fn synthetic_key(&mut self) -> NodeKey {
        let key = NodeKey::Synthetic(self.next_synthetic);
        self.next_synthetic += 1;
        key
    }
}

/// Inserts a property into the merged map; on a name collision the
/// entry becomes an intersection of the previous and new types. A new
/// intersection descriptor is constructed on every growth — member
/// lists are never appended to in place.
fn merge_property(merged: &mut PropertyMap, name: &str, prop_ty: &Arc<TypeDescriptor>) {
    let Some(existing) = merged.get(name) else {
        merged.insert(name.to_owned(), Arc::clone(prop_ty));
        return;
    };
    let members = match existing.kind() {
        TypeKind::Intersection(members) => {
            let mut grown = members.clone();
            grown.push(Arc::clone(prop_ty));
            grown
        }
        _ => vec![Arc::clone(existing), Arc::clone(prop_ty)],
    };
    merged.insert(name.to_owned(), TypeDescriptor::intersection(members));
}

/// Collapses a union or intersection node that has exactly one
/// surviving child: the node keeps its key and actual value but adopts
/// the child's expected type, and the child's children take its place.
/// Loops so that chains of nested single-branch wrappers collapse fully.
fn flatten_wrappers(mut node: ReportNode) -> ReportNode {
    while node.children.len() == 1
        && matches!(
            node.entry.ty.kind(),
            TypeKind::Union(_) | TypeKind::Intersection(_)
        )
    {
        let Some(child) = node.children.pop() else {
            break;
        };
        let ContextEntry { key, actual, .. } = node.entry;
        node.entry = ContextEntry {
            key,
            ty: child.entry.ty,
            actual,
        };
        node.children = child.children;
    }
    node
}

/// Discards union branches that cannot plausibly describe the actual
/// value, keeping only the best-supported ones.
///
/// Branches whose expected runtime category contradicts the actual
/// value's category are excluded outright — but only when at least one
/// branch's category *does* match, so a value matching nothing keeps
/// every alternative visible. The rest are scored by matching literal
/// tags, then matching properties; branches with unknowable property
/// shapes are never penalized for the lack of information.
fn prune_union_branches(node: &mut ReportNode) {
    let actual_cat = actual_category(node.entry.actual.as_ref());
    let has_category_match = node
        .children
        .iter()
        .any(|c| expected_category(&c.entry.ty) == Some(actual_cat));

    let relevance: Vec<Relevance> = node
        .children
        .iter()
        .map(|c| classify_branch(&c.entry, actual_cat, has_category_match))
        .collect();
    let best = relevance
        .iter()
        .filter_map(|r| match r {
            Relevance::Reduce(summary) => Some(*summary),
            _ => None,
        })
        .max()
        .unwrap_or_default();

    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .zip(relevance)
        .filter_map(|(child, rel)| match rel {
            Relevance::Keep => Some(child),
            Relevance::Reduce(summary) if summary >= best => Some(child),
            _ => None,
        })
        .collect();
}

/// Classifies one union branch: hard-excluded on category mismatch
/// (when a category match exists at all), otherwise scored.
fn classify_branch(
    entry: &ContextEntry,
    actual_cat: JsCategory,
    has_category_match: bool,
) -> Relevance {
    let expected = expected_category(&entry.ty);
    if has_category_match && expected.is_some_and(|cat| cat != actual_cat) {
        return Relevance::Exclude;
    }
    branch_summary(entry)
}

/// Scores a branch by how much of its known expected property shape the
/// actual object satisfies. Branches whose expected properties cannot
/// be determined are kept unconditionally.
fn branch_summary(entry: &ContextEntry) -> Relevance {
    let Some(Value::Mapping(actual)) = &entry.actual else {
        return Relevance::Reduce(KeySummary::default());
    };
    let Some(props) = known_expected_props(&entry.ty) else {
        return Relevance::Keep;
    };
    let mut summary = KeySummary::default();
    for (name, prop_ty) in &props {
        let Some(actual_value) = actual.get(name) else {
            continue;
        };
        summary.matching_props += 1;
        if let TypeKind::Literal(lit) = prop_ty.kind() {
            if lit == actual_value {
                summary.matching_literals += 1;
            }
        }
    }
    Relevance::Reduce(summary)
}

/// The properties a branch declares, when they are knowable: records
/// expose theirs directly, intersections union the known properties of
/// all members. Any member of another shape (dictionary, recursive,
/// opaque) makes the whole set unknowable.
fn known_expected_props(ty: &TypeDescriptor) -> Option<PropertyMap> {
    match ty.kind() {
        TypeKind::Record(props) => Some(props.clone()),
        TypeKind::Intersection(members) => {
            let mut merged = PropertyMap::new();
            for member in members {
                let props = known_expected_props(member)?;
                merged.extend(props);
            }
            Some(merged)
        }
        _ => None,
    }
}
